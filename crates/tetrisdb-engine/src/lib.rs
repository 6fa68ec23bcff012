#![forbid(unsafe_code)]
//! tetrisdb-engine: the worst-case-optimal join machinery.
//!
//! Layering, leaves first:
//! - `relation`: a schema plus an ordered tuple index, and the gap inference
//!   that turns sorted order into provably-empty dyadic boxes;
//! - `cds`: the per-execution certificate store memoizing those boxes;
//! - `ast` + `resolver`: the typed statement surface handed over by the
//!   parser collaborator, bound to shared logical variables;
//! - `tetris`: the recursive probe that enumerates exactly the join answers;
//! - `project`: the output gather;
//! - `catalog`: the `name -> Relation` lookup surface for embedding.
//!
//! Everything is single-threaded and synchronous; a join owns its certificate
//! store and never mutates the relations it reads.

pub mod ast;
pub mod catalog;
pub mod cds;
pub mod project;
pub mod relation;
pub mod resolver;
pub mod tetris;

pub use ast::{Atom, AtomArgs, SelectStatement, Term};
pub use catalog::Database;
pub use cds::CertificateStore;
pub use project::Projection;
pub use relation::Relation;
pub use resolver::{export_positions, resolve, ResolvedAtom, Variable, VariableSet};
pub use tetris::TetrisJoin;
