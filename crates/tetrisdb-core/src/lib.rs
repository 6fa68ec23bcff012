#![forbid(unsafe_code)]
//! tetrisdb-core: the data model of the geometric join engine.
//!
//! Everything here is pure data and arithmetic:
//! - attributes/schemas and their bit depths,
//! - typed values and their order-preserving wide-integer encoding,
//! - tuples over arbitrary-precision coordinates,
//! - dyadic interval decomposition and the trie node-id encoding,
//! - the box algebra (`contains`/`split`/`resolve`) that the join runs on.
//!
//! **No I/O, no randomness, no logging** here. The index and engine crates
//! build on these types.

pub mod attribute;
pub mod boxes;
pub mod config;
pub mod dyadic;
pub mod error;
pub mod prelude;
pub mod tuple;
pub mod value;
