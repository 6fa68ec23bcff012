use thiserror::Error;

/// Canonical result for the engine.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate tuple: {0}")]
    DuplicateTuple(String),

    #[error("value out of limits for attribute '{attribute}': {value} does not fit in {bits} bits")]
    ValueOutOfLimits {
        attribute: String,
        value: String,
        bits: u64,
    },

    #[error("arity mismatch: got {got} values, schema has {expected}")]
    ArityMismatch { got: usize, expected: usize },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("unknown relation: '{0}'")]
    UnknownRelation(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    // Violated probing-algorithm invariants end up here. Reaching this
    // variant is a defect in the engine, not a user error.
    #[error("internal invariant failed: {0}")]
    Internal(String),
}
