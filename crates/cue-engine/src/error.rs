//! Setup-time errors. The step loop itself never fails.

use thiserror::Error;

/// Errors raised while loading or validating a configuration or table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("wall {index} has zero length")]
    DegenerateWall { index: usize },

    #[error("rack shuffle failed: {0}")]
    Shuffle(#[from] ShuffleError),
}

/// Errors raised by [`shuffle_parallel`](crate::setup::shuffle::shuffle_parallel).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShuffleError {
    #[error("column {column} has length {found}, expected {expected}")]
    LengthMismatch {
        column: usize,
        expected: usize,
        found: usize,
    },
}
