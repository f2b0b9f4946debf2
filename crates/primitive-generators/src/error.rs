//! Error types for primitive generators.

use thiserror::Error;

/// Errors raised while constructing a primitive generator.
#[derive(Error, Debug)]
pub enum PrimitiveError {
    /// No generator for this string format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Pattern is not a valid regular expression.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Constraints leave no value to generate.
    #[error("Empty range for {what}: {reason}")]
    InvalidRange { what: &'static str, reason: String },
}

impl PrimitiveError {
    pub(crate) fn range(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            what,
            reason: reason.into(),
        }
    }
}
