//! The Tetris join: geometric resolution over dyadic boxes.
//!
//! `execute` enumerates exactly the conjunctive query's answer set by
//! repeatedly probing the whole-space box. A probe either returns a witness
//! certifying the queried region empty, or surfaces a candidate point no
//! certificate rules out yet. Candidates are checked against every atom's
//! relation; the gaps a relation reports around the candidate are lifted into
//! the combined schema and fed back into the certificate store, so no region
//! is ever examined twice. When no atom objects, the candidate is an answer.

use num_bigint::BigUint;
use tracing::{debug, trace};

use tetrisdb_core::attribute::Schema;
use tetrisdb_core::boxes::DyadicBox;
use tetrisdb_core::config::{DuplicatePolicy, EngineConfig};
use tetrisdb_core::dyadic::{is_ancestor, wildcard};
use tetrisdb_core::error::{Error, Result};
use tetrisdb_core::tuple::Tuple;
use tetrisdb_index::OrderedIndex;

use crate::cds::CertificateStore;
use crate::resolver::{ResolvedAtom, VariableSet};

/// Outcome of probing one box.
enum Probe {
    /// The region is certified empty; the witness contains the probed box.
    Gap(DyadicBox),
    /// A point box no certificate covers; a candidate answer.
    Candidate(DyadicBox),
}

pub struct TetrisJoin {
    config: EngineConfig,
}

impl TetrisJoin {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Run the join over resolved atoms, returning the ordered answer index.
    ///
    /// The certificate store is created here and dropped on return, which
    /// makes the engine reentrant: nothing is shared across executions.
    pub fn execute(
        &self,
        atoms: &[ResolvedAtom<'_>],
        vars: &VariableSet,
    ) -> Result<OrderedIndex<Tuple>> {
        if atoms.is_empty() {
            return Err(Error::UnsupportedOperation(
                "select statement with an empty body".into(),
            ));
        }
        let schema = vars.schema();
        // One recursion level per bit plus the per-dimension root levels.
        let depth_bound = schema.total_depth() + schema.arity() as u64;
        if depth_bound > self.config.max_probe_depth {
            return Err(Error::LimitExceeded(format!(
                "query schema needs probe depth {depth_bound}, configured maximum is {}",
                self.config.max_probe_depth
            )));
        }
        debug!(
            atoms = atoms.len(),
            variables = schema.arity(),
            depth = depth_bound,
            "tetris join start"
        );

        let mut cds = CertificateStore::new(schema.arity());
        let mut answers = match self.config.seed {
            Some(seed) => OrderedIndex::with_seed(DuplicatePolicy::Reject, seed),
            None => OrderedIndex::new(DuplicatePolicy::Reject),
        };
        let space = DyadicBox::whole_space(schema.arity());

        loop {
            match self.probe(&space, &schema, &mut cds)? {
                Probe::Gap(_) => break,
                Probe::Candidate(candidate_box) => {
                    let candidate = candidate_box.to_tuple(&schema)?;
                    let mut lifted = 0usize;
                    for atom in atoms {
                        let projected = atom.project(&candidate);
                        for gap in atom.relation.gaps(&projected)? {
                            if let Some(b) = lift(atom, &gap, schema.arity()) {
                                cds.insert(&b);
                                lifted += 1;
                            }
                        }
                    }
                    if lifted == 0 {
                        trace!(answer = %candidate, "answer found");
                        answers.insert(candidate)?;
                        cds.insert(&candidate_box);
                    } else {
                        trace!(candidate = %candidate, gaps = lifted, "candidate ruled out");
                    }
                }
            }
        }
        debug!(
            answers = answers.len(),
            certificates = cds.len(),
            "tetris join finished"
        );
        Ok(answers)
    }

    /// Recursive geometric resolution. Depth is bounded by the schema's total
    /// bit depth, which `execute` has already checked against the configured
    /// maximum.
    fn probe(&self, b: &DyadicBox, schema: &Schema, cds: &mut CertificateStore) -> Result<Probe> {
        if let Some(witness) = cds.witness(b) {
            return Ok(Probe::Gap(witness));
        }
        if b.is_point(schema) {
            return Ok(Probe::Candidate(b.clone()));
        }
        let (b1, b2) = b.split(schema)?;
        let w1 = match self.probe(&b1, schema, cds)? {
            Probe::Candidate(c) => return Ok(Probe::Candidate(c)),
            Probe::Gap(w) => w,
        };
        if w1.contains(b) {
            return Ok(Probe::Gap(w1));
        }
        let w2 = match self.probe(&b2, schema, cds)? {
            Probe::Candidate(c) => return Ok(Probe::Candidate(c)),
            Probe::Gap(w) => w,
        };
        if w2.contains(b) {
            return Ok(Probe::Gap(w2));
        }
        // Both halves are certified but neither witness alone covers the
        // parent: resolve the sibling pair into one certificate for it.
        let merged = w1.resolve(&w2)?;
        debug_assert!(merged.contains(b));
        cds.insert(&merged);
        Ok(Probe::Gap(merged))
    }
}

/// Lift an atom-space gap box into the combined schema: bound dimensions take
/// the gap's ids, unbound dimensions stay wild.
///
/// A variable occurring at several positions of the same atom receives the
/// intersection of its per-position intervals: the deeper id when nested,
/// no box at all when they are disjoint (the lift would constrain nothing).
fn lift(atom: &ResolvedAtom<'_>, gap: &DyadicBox, arity: usize) -> Option<DyadicBox> {
    let mut ids: Vec<BigUint> = vec![wildcard(); arity];
    for (pos, &var) in atom.positions.iter().enumerate() {
        let id = gap.id(pos);
        if is_ancestor(&ids[var], id) {
            ids[var] = id.clone();
        } else if !is_ancestor(id, &ids[var]) {
            return None;
        }
    }
    Some(DyadicBox::new(ids))
}
