use thiserror::Error;

/// Errors produced while building or inspecting records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A field name that the kind does not declare.
    #[error("{kind} has no field named {field:?}")]
    UnknownField { kind: String, field: String },

    /// Input did not match the declared record schema.
    #[error("schema violation: {0}")]
    Schema(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for record model results.
pub type TypeResult<T> = Result<T, TypeError>;
