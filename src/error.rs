//! Error types for schema compilation and fixture generation.

use primitive_generators::PrimitiveError;
use schema_core::SchemaError;
use thiserror::Error;

/// Errors surfaced by compilation, generation and configuration.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Schema name was never registered
    #[error("Schema not registered: {0}")]
    SchemaNotFound(String),

    /// Malformed schema node or unresolvable `$ref` pointer
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Primitive generator could not be built
    #[error("Primitive generator error: {0}")]
    Primitive(#[from] PrimitiveError),

    /// `relation()` on a store that was never filled
    #[error("Store for schema '{0}' is empty")]
    EmptyStore(String),

    /// Configuration is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error reading a configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FixtureError {
    /// True for errors caused by a missing schema or pointer target.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            FixtureError::SchemaNotFound(_)
                | FixtureError::Schema(SchemaError::PointerNotFound { .. })
        )
    }
}
