//! The box algebra: hyper-rectangles over dyadic-encoded domains.
//!
//! A box holds one trie node id per schema dimension. A box whose every id is
//! a depth-`D` leaf is a *point box* and converts 1:1 to a tuple by clearing
//! the marker bits. `contains`/`split`/`resolve` are the three operations the
//! probe algorithm runs on; `resolve` is the geometric resolution step that
//! certifies a parent region from its two fully-explored halves.

use std::fmt;

use num_bigint::BigUint;
use num_traits::One;

use crate::attribute::Schema;
use crate::dyadic::{bit_length, is_ancestor, leaf, wildcard};
use crate::error::{Error, Result};
use crate::tuple::Tuple;

/// A hyper-rectangle: one node id per dimension.
///
/// Named `DyadicBox` to stay clear of `std::boxed::Box`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DyadicBox {
    ids: Vec<BigUint>,
}

impl DyadicBox {
    pub fn new(ids: Vec<BigUint>) -> Self {
        Self { ids }
    }

    /// The all-wildcard box covering the entire `arity`-dimensional space.
    pub fn whole_space(arity: usize) -> Self {
        Self {
            ids: vec![wildcard(); arity],
        }
    }

    /// The point box of a concrete tuple: every dimension at its leaf id.
    pub fn from_tuple(tuple: &Tuple, schema: &Schema) -> Self {
        let ids = tuple
            .iter()
            .zip(schema.iter())
            .map(|(v, a)| leaf(v, a.depth()))
            .collect();
        Self { ids }
    }

    pub fn arity(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[BigUint] {
        &self.ids
    }

    pub fn id(&self, dim: usize) -> &BigUint {
        &self.ids[dim]
    }

    /// True iff every dimension's id carries its leaf marker, i.e. the box is
    /// a single concrete tuple.
    pub fn is_point(&self, schema: &Schema) -> bool {
        self.ids
            .iter()
            .zip(schema.iter())
            .all(|(id, a)| bit_length(id) == a.depth() + 1)
    }

    /// Convert a point box to its tuple by clearing each marker bit.
    pub fn to_tuple(&self, schema: &Schema) -> Result<Tuple> {
        if !self.is_point(schema) {
            return Err(Error::Internal(format!(
                "to_tuple on a non-point box {self}"
            )));
        }
        let values = self
            .ids
            .iter()
            .zip(schema.iter())
            .map(|(id, a)| id - a.marker())
            .collect();
        Ok(Tuple::new(values))
    }

    /// Dimension-wise ancestor test: this box contains `other` iff in every
    /// dimension this id is a trie ancestor of (or equal to) the other's.
    pub fn contains(&self, other: &DyadicBox) -> bool {
        self.ids.len() == other.ids.len()
            && self
                .ids
                .iter()
                .zip(other.ids.iter())
                .all(|(a, b)| is_ancestor(a, b))
    }

    /// Split on the first thick dimension (one not yet at leaf depth),
    /// yielding the two child boxes that partition this box.
    pub fn split(&self, schema: &Schema) -> Result<(DyadicBox, DyadicBox)> {
        let dim = self
            .ids
            .iter()
            .zip(schema.iter())
            .position(|(id, a)| bit_length(id) <= a.depth())
            .ok_or_else(|| Error::Internal(format!("split on the point box {self}")))?;
        let mut low = self.ids.clone();
        let mut high = self.ids.clone();
        low[dim] = &self.ids[dim] << 1u32;
        high[dim] = &low[dim] | BigUint::one();
        Ok((DyadicBox::new(low), DyadicBox::new(high)))
    }

    /// Merge two adjacent, fully-explored boxes into a box covering their
    /// union's parent region.
    ///
    /// Precondition (asserted, not assumed): exactly one dimension `p` holds a
    /// sibling pair, `other[p] == self[p] + 1` at equal depth. Every other
    /// dimension keeps whichever id is shallower; dimension `p` drops its last
    /// bit, promoting the sibling pair to their parent.
    pub fn resolve(&self, other: &DyadicBox) -> Result<DyadicBox> {
        if self.ids.len() != other.ids.len() {
            return Err(Error::Internal("resolve on boxes of different arity".into()));
        }
        let mut pivot = None;
        for (dim, (a, b)) in self.ids.iter().zip(other.ids.iter()).enumerate() {
            if bit_length(a) == bit_length(b) && *b == a + BigUint::one() {
                if pivot.is_some() {
                    return Err(Error::Internal(format!(
                        "resolve of {self} and {other}: more than one adjacent dimension"
                    )));
                }
                pivot = Some(dim);
            }
        }
        let pivot = pivot.ok_or_else(|| {
            Error::Internal(format!(
                "resolve of {self} and {other}: no adjacent sibling dimension"
            ))
        })?;
        let ids = self
            .ids
            .iter()
            .zip(other.ids.iter())
            .enumerate()
            .map(|(dim, (a, b))| {
                if dim == pivot {
                    a >> 1u32
                } else if bit_length(a) <= bit_length(b) {
                    debug_assert!(is_ancestor(a, b));
                    a.clone()
                } else {
                    debug_assert!(is_ancestor(b, a));
                    b.clone()
                }
            })
            .collect();
        Ok(DyadicBox::new(ids))
    }
}

impl fmt::Display for DyadicBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id:b}")?;
        }
        write!(f, "]")
    }
}
