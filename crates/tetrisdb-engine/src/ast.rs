//! The already-typed statement surface handed over by the parser.
//!
//! The engine never tokenizes query text; the parser collaborator delivers a
//! statement reduced to exports plus a body of atoms, with every argument
//! already classified as a variable or a constant.

use serde::{Deserialize, Serialize};

use tetrisdb_core::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    Variable(String),
    /// Present in the AST for completeness; the resolver rejects these.
    Constant(Value),
}

/// Atom arguments, either positional (`r(x, y)`) or keyed by attribute name
/// (`r{b: y, c: z}`). Named form may mention a subset of the attributes; the
/// rest become fresh, effectively existentially-quantified variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AtomArgs {
    Positional(Vec<Term>),
    Named(Vec<(String, Term)>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub relation: String,
    pub args: AtomArgs,
}

impl Atom {
    pub fn positional(relation: impl Into<String>, vars: &[&str]) -> Self {
        Self {
            relation: relation.into(),
            args: AtomArgs::Positional(
                vars.iter()
                    .map(|v| Term::Variable((*v).to_string()))
                    .collect(),
            ),
        }
    }

    pub fn named(relation: impl Into<String>, bindings: &[(&str, &str)]) -> Self {
        Self {
            relation: relation.into(),
            args: AtomArgs::Named(
                bindings
                    .iter()
                    .map(|(a, v)| ((*a).to_string(), Term::Variable((*v).to_string())))
                    .collect(),
            ),
        }
    }
}

/// A conjunctive query: `exports` name the output columns and the variables
/// they carry; `body` is the list of atoms joined over shared variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    pub exports: Vec<(String, String)>,
    pub body: Vec<Atom>,
}
