//! Error type shared by input loading, store construction and configuration.

use thiserror::Error;

/// Errors surfaced to callers of this crate.
///
/// Invariant breaches inside the placement loop (placing into a full slot,
/// placing an already placed candidate) are not represented here; they
/// panic.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: u64, reason: String },

    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlacementError {
    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        PlacementError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
