//! Fixed-arity tuples of raw dimension values.

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// An ordered sequence of raw unsigned values, one per attribute, each in
/// `[0, 2^D_i)` for its dimension's bit depth.
///
/// Coordinates are arbitrary precision: a wide string attribute can produce
/// values that do not fit in 64 bits. Tuples compare lexicographically,
/// left to right, first differing position decides. Within one index all
/// tuples share an arity, so the derived `Ord` never falls back to length.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tuple(Vec<BigUint>);

impl Tuple {
    pub fn new(values: Vec<BigUint>) -> Self {
        Self(values)
    }

    /// Convenience constructor for narrow test data.
    pub fn from_u64s(values: &[u64]) -> Self {
        Self(values.iter().map(|&v| BigUint::from(v)).collect())
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, idx: usize) -> Option<&BigUint> {
        self.0.get(idx)
    }

    pub fn values(&self) -> &[BigUint] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &BigUint> {
        self.0.iter()
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}
