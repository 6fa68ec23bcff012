//! Variable resolution: bind atom arguments to shared logical variables and
//! derive the join's working schema.
//!
//! Variables are identified by name across the whole statement body; ids are
//! assigned in first-seen order and double as positions in the combined
//! schema. Reusing a name at two different `(kind, width)` attributes is a
//! type error. Attributes a named atom leaves out are bound to fresh
//! auto-named variables, so the atom constrains only what it mentions.

use std::collections::HashMap;

use tetrisdb_core::attribute::{AttrKind, Attribute, Schema};
use tetrisdb_core::error::{Error, Result};
use tetrisdb_core::tuple::Tuple;

use crate::ast::{Atom, AtomArgs, Term};
use crate::catalog::Database;
use crate::relation::Relation;

#[derive(Debug, Clone)]
pub struct Variable {
    pub id: usize,
    pub name: String,
    pub kind: AttrKind,
    pub width: usize,
}

#[derive(Debug, Default)]
pub struct VariableSet {
    vars: Vec<Variable>,
    by_name: HashMap<String, usize>,
    fresh: usize,
}

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Variable> {
        self.vars.get(id)
    }

    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    /// Bind `name` at the given type, reusing an existing variable when the
    /// name recurs with an identical `(kind, width)`.
    pub fn bind(&mut self, name: &str, kind: AttrKind, width: usize) -> Result<usize> {
        if let Some(&id) = self.by_name.get(name) {
            let var = &self.vars[id];
            if var.kind != kind || var.width != width {
                return Err(Error::UnsupportedOperation(format!(
                    "variable '{name}' bound at {:?}/{} and {kind:?}/{width}",
                    var.kind, var.width
                )));
            }
            return Ok(id);
        }
        let id = self.vars.len();
        self.vars.push(Variable {
            id,
            name: name.to_string(),
            kind,
            width,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// A fresh anonymous variable, unconstrained outside its atom.
    pub fn bind_fresh(&mut self, kind: AttrKind, width: usize) -> usize {
        let name = loop {
            let candidate = format!("_{}", self.fresh);
            self.fresh += 1;
            if !self.by_name.contains_key(&candidate) {
                break candidate;
            }
        };
        let id = self.vars.len();
        self.vars.push(Variable {
            id,
            name: name.clone(),
            kind,
            width,
        });
        self.by_name.insert(name, id);
        id
    }

    /// The combined working schema: one attribute per variable, in id order.
    pub fn schema(&self) -> Schema {
        Schema::new(
            self.vars
                .iter()
                .map(|v| Attribute::new(v.name.clone(), v.kind, v.width))
                .collect(),
        )
    }
}

/// An atom after resolution: its relation plus, per relation attribute
/// position, the id of the variable bound there.
pub struct ResolvedAtom<'a> {
    pub relation: &'a Relation,
    pub positions: Vec<usize>,
}

impl ResolvedAtom<'_> {
    /// Project a combined-schema candidate onto this atom's positions.
    pub fn project(&self, candidate: &Tuple) -> Tuple {
        Tuple::new(
            self.positions
                .iter()
                .map(|&var| candidate.values()[var].clone())
                .collect(),
        )
    }
}

/// Bind every atom of a statement body against the catalog.
pub fn resolve<'a>(
    db: &'a Database,
    body: &[Atom],
) -> Result<(Vec<ResolvedAtom<'a>>, VariableSet)> {
    let mut vars = VariableSet::new();
    let mut resolved = Vec::with_capacity(body.len());
    for atom in body {
        let relation = db
            .relation(&atom.relation)
            .ok_or_else(|| Error::UnknownRelation(atom.relation.clone()))?;
        let schema = relation.schema();
        let positions = match &atom.args {
            AtomArgs::Positional(terms) => {
                if terms.len() != schema.arity() {
                    return Err(Error::ArityMismatch {
                        got: terms.len(),
                        expected: schema.arity(),
                    });
                }
                terms
                    .iter()
                    .zip(schema.iter())
                    .map(|(term, attr)| bind_term(&mut vars, term, attr))
                    .collect::<Result<Vec<_>>>()?
            }
            AtomArgs::Named(pairs) => {
                let mut bound: Vec<Option<usize>> = vec![None; schema.arity()];
                for (attr_name, term) in pairs {
                    let pos = schema.index_of(attr_name).ok_or_else(|| {
                        Error::UnsupportedOperation(format!(
                            "relation '{}' has no attribute '{attr_name}'",
                            atom.relation
                        ))
                    })?;
                    if bound[pos].is_some() {
                        return Err(Error::UnsupportedOperation(format!(
                            "attribute '{attr_name}' bound twice in atom '{}'",
                            atom.relation
                        )));
                    }
                    let attr = &schema.attributes[pos];
                    bound[pos] = Some(bind_term(&mut vars, term, attr)?);
                }
                bound
                    .into_iter()
                    .zip(schema.iter())
                    .map(|(slot, attr)| {
                        slot.unwrap_or_else(|| vars.bind_fresh(attr.kind, attr.width))
                    })
                    .collect()
            }
        };
        resolved.push(ResolvedAtom {
            relation,
            positions,
        });
    }
    Ok((resolved, vars))
}

fn bind_term(vars: &mut VariableSet, term: &Term, attr: &Attribute) -> Result<usize> {
    match term {
        Term::Variable(name) => vars.bind(name, attr.kind, attr.width),
        Term::Constant(_) => Err(Error::UnsupportedOperation(
            "constant-valued atom arguments are not supported".into(),
        )),
    }
}

/// Map a statement's exports onto combined-schema positions.
pub fn export_positions(exports: &[(String, String)], vars: &VariableSet) -> Result<Vec<usize>> {
    exports
        .iter()
        .map(|(_, var)| {
            vars.id_of(var).ok_or_else(|| {
                Error::UnsupportedOperation(format!("exported variable '{var}' is not bound"))
            })
        })
        .collect()
}
