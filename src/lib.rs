#![forbid(unsafe_code)]
//! tetrisdb: a relational engine built around a worst-case-optimal join.
//!
//! Instead of pairwise nested/hash joins, conjunctive queries are answered by
//! geometric resolution ("Tetris join") over a dyadic-interval encoding of the
//! attribute domains. This facade re-exports the public surface of the
//! workspace crates; see `tetrisdb-core` for the data model, `tetrisdb-index`
//! for the ordered index, and `tetrisdb-engine` for the join machinery.

pub use tetrisdb_core::attribute::{AttrKind, Attribute, Schema};
pub use tetrisdb_core::boxes::DyadicBox;
pub use tetrisdb_core::config::{DuplicatePolicy, EngineConfig};
pub use tetrisdb_core::dyadic::{decompose, is_ancestor, leaf, wildcard};
pub use tetrisdb_core::error::{Error, Result};
pub use tetrisdb_core::tuple::Tuple;
pub use tetrisdb_core::value::Value;
pub use tetrisdb_engine::{
    resolve, Atom, AtomArgs, CertificateStore, Database, Projection, Relation, ResolvedAtom,
    SelectStatement, Term, TetrisJoin, Variable, VariableSet,
};
pub use tetrisdb_index::OrderedIndex;
