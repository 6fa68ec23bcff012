//! Relations: a fixed schema over an ordered tuple index, and the gap
//! inference the geometric join runs on.
//!
//! `gaps` is the constructive heart of the engine: given any probe tuple, the
//! predecessor/successor pair from the sorted index proves that everything
//! lexicographically between two adjacent stored tuples (or beyond the ends)
//! is empty, and `decompose` turns that emptiness into finitely many dyadic
//! boxes.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use tetrisdb_core::attribute::Schema;
use tetrisdb_core::boxes::DyadicBox;
use tetrisdb_core::config::EngineConfig;
use tetrisdb_core::dyadic::{decompose, leaf, wildcard};
use tetrisdb_core::error::{Error, Result};
use tetrisdb_core::tuple::Tuple;
use tetrisdb_core::value::Value;
use tetrisdb_index::OrderedIndex;

pub struct Relation {
    name: String,
    schema: Schema,
    index: OrderedIndex<Tuple>,
}

impl Relation {
    /// Create an empty relation. The schema is validated here and immutable
    /// afterwards.
    pub fn new(name: impl Into<String>, schema: Schema, config: &EngineConfig) -> Result<Self> {
        let name = name.into();
        if schema.arity() == 0 {
            return Err(Error::UnsupportedOperation(format!(
                "relation '{name}' must have at least one attribute"
            )));
        }
        if let Some(attr) = schema.iter().find(|a| a.width == 0) {
            return Err(Error::UnsupportedOperation(format!(
                "attribute '{}' of relation '{name}' has zero width",
                attr.name
            )));
        }
        let index = match config.seed {
            Some(seed) => OrderedIndex::with_seed(config.duplicates, seed),
            None => OrderedIndex::new(config.duplicates),
        };
        Ok(Self {
            name,
            schema,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tuple> {
        self.index.iter()
    }

    pub fn contains(&self, tuple: &Tuple) -> bool {
        self.index.contains(tuple)
    }

    /// Insert a raw tuple. Raises on arity mismatch, out-of-range coordinates,
    /// and duplicates under the reject policy.
    pub fn insert(&mut self, tuple: Tuple) -> Result<()> {
        self.check_arity(&tuple)?;
        for (raw, attr) in tuple.iter().zip(self.schema.iter()) {
            if raw.bits() > attr.depth() {
                return Err(Error::ValueOutOfLimits {
                    attribute: attr.name.clone(),
                    value: raw.to_string(),
                    bits: attr.depth(),
                });
            }
        }
        self.index.insert(tuple)
    }

    /// Encode one typed value per attribute and insert the result.
    pub fn insert_values(&mut self, values: &[Value]) -> Result<()> {
        let tuple = self.schema.encode_tuple(values)?;
        self.insert(tuple)
    }

    fn check_arity(&self, tuple: &Tuple) -> Result<()> {
        if tuple.arity() != self.schema.arity() {
            return Err(Error::ArityMismatch {
                got: tuple.arity(),
                expected: self.schema.arity(),
            });
        }
        Ok(())
    }

    /// The boxes around `probe` that provably hold no tuple of this relation.
    ///
    /// - empty relation: the whole space;
    /// - probe already stored: nothing;
    /// - probe past either end: everything beyond the boundary tuple;
    /// - probe strictly between two stored neighbours: everything between
    ///   them, excluding both.
    pub fn gaps(&self, probe: &Tuple) -> Result<Vec<DyadicBox>> {
        self.check_arity(probe)?;
        if self.index.is_empty() {
            return Ok(vec![DyadicBox::whole_space(self.schema.arity())]);
        }
        let (pred, succ) = self.index.neighbours(probe);
        if succ == Some(probe) {
            return Ok(Vec::new());
        }

        let mut out = Vec::new();
        match (pred, succ) {
            (Some(p), None) => {
                for dim in 0..self.schema.arity() {
                    self.blocks_above(p, dim, &mut out);
                }
            }
            (None, Some(s)) => {
                for dim in 0..self.schema.arity() {
                    self.blocks_below(s, dim, &mut out);
                }
            }
            (Some(p), Some(s)) => {
                // First dimension where the neighbours part ways; the shared
                // prefix is fixed in every emitted box.
                let split = p
                    .iter()
                    .zip(s.iter())
                    .position(|(a, b)| a != b)
                    .ok_or_else(|| {
                        Error::Internal(format!("equal neighbours {p} and {s} in '{}'", self.name))
                    })?;
                let attr = &self.schema.attributes[split];
                let lo = p.values()[split].clone() + BigUint::one();
                for block in decompose(&lo, &s.values()[split], attr.depth()) {
                    out.push(self.fenced(p, split, block));
                }
                for dim in split + 1..self.schema.arity() {
                    self.blocks_above(p, dim, &mut out);
                    self.blocks_below(s, dim, &mut out);
                }
            }
            (None, None) => {
                return Err(Error::Internal(format!(
                    "non-empty relation '{}' produced no neighbours",
                    self.name
                )))
            }
        }
        Ok(out)
    }

    /// Boxes covering everything above `t[dim]` with `t[0..dim]` fixed and all
    /// later dimensions wild.
    fn blocks_above(&self, t: &Tuple, dim: usize, out: &mut Vec<DyadicBox>) {
        let attr = &self.schema.attributes[dim];
        let lo = t.values()[dim].clone() + BigUint::one();
        let hi = BigUint::one() << attr.depth();
        for block in decompose(&lo, &hi, attr.depth()) {
            out.push(self.fenced(t, dim, block));
        }
    }

    /// Boxes covering everything below `t[dim]` with `t[0..dim]` fixed and all
    /// later dimensions wild.
    fn blocks_below(&self, t: &Tuple, dim: usize, out: &mut Vec<DyadicBox>) {
        let attr = &self.schema.attributes[dim];
        for block in decompose(&BigUint::zero(), &t.values()[dim], attr.depth()) {
            out.push(self.fenced(t, dim, block));
        }
    }

    /// One box: leaves of `t` before `dim`, `block` at `dim`, wildcards after.
    fn fenced(&self, t: &Tuple, dim: usize, block: BigUint) -> DyadicBox {
        let mut ids = Vec::with_capacity(self.schema.arity());
        for (i, attr) in self.schema.iter().enumerate() {
            if i < dim {
                ids.push(leaf(&t.values()[i], attr.depth()));
            } else if i == dim {
                ids.push(block.clone());
            } else {
                ids.push(wildcard());
            }
        }
        DyadicBox::new(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetrisdb_core::attribute::{AttrKind, Attribute};

    fn relation(tuples: &[[u64; 2]]) -> Relation {
        let schema = Schema::new(vec![
            Attribute::new("a", AttrKind::Int, 1),
            Attribute::new("b", AttrKind::Int, 1),
        ]);
        let mut r = Relation::new("r", schema, &EngineConfig::default()).unwrap();
        for t in tuples {
            r.insert(Tuple::from_u64s(t)).unwrap();
        }
        r
    }

    fn in_some_gap(gaps: &[DyadicBox], t: &Tuple, schema: &Schema) -> bool {
        let point = DyadicBox::from_tuple(t, schema);
        gaps.iter().any(|g| g.contains(&point))
    }

    #[test]
    fn empty_relation_gap_is_whole_space() {
        let r = relation(&[]);
        let gaps = r.gaps(&Tuple::from_u64s(&[3, 3])).unwrap();
        assert_eq!(gaps, vec![DyadicBox::whole_space(2)]);
    }

    #[test]
    fn member_probe_has_no_gap() {
        let r = relation(&[[3, 3]]);
        assert!(r.gaps(&Tuple::from_u64s(&[3, 3])).unwrap().is_empty());
    }

    #[test]
    fn gaps_are_sound_and_cover_the_probe() {
        // Exhaustive over a tiny domain: every gap box must be free of stored
        // tuples, and a non-member probe must land in one of its gaps.
        let stored = [[3u64, 200], [3, 201], [77, 0], [255, 255]];
        let r = relation(&stored);
        let schema = r.schema().clone();
        let probes = [
            [0u64, 0],
            [3, 199],
            [3, 200],
            [3, 202],
            [4, 0],
            [76, 255],
            [77, 1],
            [200, 123],
            [255, 254],
        ];
        for probe in probes {
            let probe = Tuple::from_u64s(&probe);
            let gaps = r.gaps(&probe).unwrap();
            for s in &stored {
                assert!(
                    !in_some_gap(&gaps, &Tuple::from_u64s(s), &schema),
                    "stored tuple {s:?} inside a gap for probe {probe}"
                );
            }
            if !r.contains(&probe) {
                assert!(
                    in_some_gap(&gaps, &probe, &schema),
                    "probe {probe} not covered by its own gaps"
                );
            } else {
                assert!(gaps.is_empty());
            }
        }
    }

    #[test]
    fn insert_validates_arity_and_range() {
        let mut r = relation(&[]);
        assert!(matches!(
            r.insert(Tuple::from_u64s(&[1])),
            Err(Error::ArityMismatch { .. })
        ));
        assert!(matches!(
            r.insert(Tuple::from_u64s(&[256, 0])),
            Err(Error::ValueOutOfLimits { .. })
        ));
    }

    #[test]
    fn duplicate_insert_rejected() {
        let mut r = relation(&[[1, 2]]);
        assert!(matches!(
            r.insert(Tuple::from_u64s(&[1, 2])),
            Err(Error::DuplicateTuple(_))
        ));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn zero_width_schema_refused() {
        let schema = Schema::new(vec![Attribute::new("a", AttrKind::Int, 0)]);
        assert!(Relation::new("bad", schema, &EngineConfig::default()).is_err());
    }
}
