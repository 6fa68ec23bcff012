//! Output projection: a pure per-row gather of selected columns.

use tetrisdb_core::config::DuplicatePolicy;
use tetrisdb_core::error::{Error, Result};
use tetrisdb_core::tuple::Tuple;
use tetrisdb_index::OrderedIndex;

pub struct Projection;

impl Projection {
    /// For every input tuple, keep only `positions`, in the requested order.
    ///
    /// The result is an ordered index over the projected rows, so the output
    /// order is the projected tuples' own sort order. No row is dropped and
    /// duplicates are kept, since narrowing columns can collapse distinct
    /// inputs.
    pub fn execute(input: &OrderedIndex<Tuple>, positions: &[usize]) -> Result<OrderedIndex<Tuple>> {
        let mut out = OrderedIndex::new(DuplicatePolicy::Allow);
        for tuple in input.iter() {
            let row = positions
                .iter()
                .map(|&p| {
                    tuple.get(p).cloned().ok_or_else(|| {
                        Error::Internal(format!(
                            "projection position {p} out of range for arity {}",
                            tuple.arity()
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            out.insert(Tuple::new(row))?;
        }
        Ok(out)
    }
}
