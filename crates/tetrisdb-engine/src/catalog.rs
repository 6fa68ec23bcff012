//! Minimal catalog: the `name -> Relation` lookup surface the resolver and
//! embedders consume, plus end-to-end select evaluation.

use std::collections::HashMap;

use tetrisdb_core::attribute::Schema;
use tetrisdb_core::config::EngineConfig;
use tetrisdb_core::error::{Error, Result};
use tetrisdb_core::tuple::Tuple;
use tetrisdb_index::OrderedIndex;

use crate::ast::SelectStatement;
use crate::project::Projection;
use crate::relation::Relation;
use crate::resolver::{export_positions, resolve};
use crate::tetris::TetrisJoin;

pub struct Database {
    config: EngineConfig,
    relations: HashMap<String, Relation>,
}

impl Database {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            relations: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn create_relation(&mut self, name: &str, schema: Schema) -> Result<&mut Relation> {
        if self.relations.contains_key(name) {
            return Err(Error::UnsupportedOperation(format!(
                "relation '{name}' already exists"
            )));
        }
        let relation = Relation::new(name, schema, &self.config)?;
        Ok(self.relations.entry(name.to_string()).or_insert(relation))
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }

    pub fn relation_mut(&mut self, name: &str) -> Option<&mut Relation> {
        self.relations.get_mut(name)
    }

    /// Evaluate a select statement: resolve, join, project.
    pub fn select(&self, stmt: &SelectStatement) -> Result<OrderedIndex<Tuple>> {
        let (atoms, vars) = resolve(self, &stmt.body)?;
        let answers = TetrisJoin::new(self.config.clone()).execute(&atoms, &vars)?;
        let positions = export_positions(&stmt.exports, &vars)?;
        Projection::execute(&answers, &positions)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
