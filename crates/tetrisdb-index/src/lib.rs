#![forbid(unsafe_code)]
//! tetrisdb-index: the ordered tuple index behind every relation.
//!
//! One structure lives here: an arena-backed skip list with expected
//! O(log n) insert and neighbour lookup. The gap inference in the engine
//! crate leans entirely on `neighbours`: a single descent yields both the
//! strict predecessor and the successor of a probe.
//!
//! No I/O and no engine types here beyond `tetrisdb-core`.

pub mod skiplist;

pub use skiplist::OrderedIndex;
