//! Error types for the diff crate.

use mid_types::{PartKind, TypeError};

/// Errors that can occur during diff operations.
///
/// These signal programming errors in the caller, not data discrepancies.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// The two parts handed to a comparison are of different kinds.
    #[error("cannot compare {left} to {right}")]
    KindMismatch { left: PartKind, right: PartKind },

    /// Field lookup or schema failure in the record model.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be parsed.
    #[error("invalid diff configuration: {0}")]
    Config(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
