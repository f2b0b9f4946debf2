//! Error types for schema operations.

use thiserror::Error;

/// Error type for schema operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// `$ref` value is not a usable pointer
    #[error("Invalid $ref '{0}'")]
    InvalidRef(String),

    /// A pointer segment does not exist in the target document
    #[error("Segment '{segment}' of '{pointer}' not found in schema '{schema}'")]
    PointerNotFound {
        schema: String,
        pointer: String,
        segment: String,
    },

    /// A recognized keyword carries a value of the wrong shape
    #[error("Invalid value for '{keyword}': {reason}")]
    InvalidKeyword {
        keyword: &'static str,
        reason: String,
    },

    /// `anyOf` / `oneOf` / `allOf` with no subschemas
    #[error("'{0}' requires at least one subschema")]
    EmptyCombinator(&'static str),

    /// `enum` with no values left after filtering by `type`
    #[error("'enum' has no values of type '{0}'")]
    EmptyEnum(String),

    /// `type` names something other than the seven JSON types
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Constraint keywords could not be read
    #[error("Invalid constraints: {0}")]
    Constraints(#[from] serde_json::Error),
}
