//! Engine configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

/// What a relation's index does with a tuple it already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Raise `DuplicateTuple` on the second insert.
    Reject,
    /// Let equal tuples silently coexist.
    Allow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Optional seed for the skip-list tower RNG; set it for replayable runs.
    pub seed: Option<u64>,

    /// Default duplicate handling for newly created relations.
    pub duplicates: DuplicatePolicy,

    /// Upper bound on probe recursion depth (the query schema's total bit
    /// depth plus one level per dimension). Joins over wider schemas are
    /// refused up front instead of risking stack exhaustion mid-probe.
    pub max_probe_depth: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            duplicates: DuplicatePolicy::Reject,
            max_probe_depth: 16 * 1024,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `TETRISDB_SEED`: RNG seed
    /// - `TETRISDB_ALLOW_DUPLICATES`: `1`/`true` to let duplicates coexist
    /// - `TETRISDB_MAX_PROBE_DEPTH`: probe recursion bound in bits
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("TETRISDB_SEED") {
            if let Ok(v) = s.parse::<u64>() {
                cfg.seed = Some(v);
            }
        }

        if let Ok(s) = std::env::var("TETRISDB_ALLOW_DUPLICATES") {
            if s == "1" || s.eq_ignore_ascii_case("true") {
                cfg.duplicates = DuplicatePolicy::Allow;
            }
        }

        if let Ok(s) = std::env::var("TETRISDB_MAX_PROBE_DEPTH") {
            if let Ok(v) = s.parse::<u64>() {
                cfg.max_probe_depth = v;
            }
        }

        cfg
    }
}
