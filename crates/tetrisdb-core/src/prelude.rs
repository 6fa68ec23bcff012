//! Convenient re-exports for downstream crates.

pub use crate::attribute::{AttrKind, Attribute, Schema};
pub use crate::boxes::DyadicBox;
pub use crate::config::{DuplicatePolicy, EngineConfig};
pub use crate::dyadic::{bit_length, decompose, is_ancestor, leaf, wildcard};
pub use crate::error::{Error, Result};
pub use crate::tuple::Tuple;
pub use crate::value::Value;
