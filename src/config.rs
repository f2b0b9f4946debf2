//! YAML configuration for a schema registry.
//!
//! ```yaml
//! seed: 42
//! stores:
//!   User: 10
//! schemas:
//!   User:
//!     type: object
//!     properties:
//!       id: { type: integer }
//! ```

use crate::error::FixtureError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parsed configuration; feed it to
/// [`SchemaRegistry::from_config`](crate::SchemaRegistry::from_config).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Base seed for reproducible output; omitted means entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Store size used by `SchemaRegistry::fixture`, per schema
    #[serde(default)]
    pub stores: IndexMap<String, usize>,

    /// Raw schema documents, registered in this order
    #[serde(default)]
    pub schemas: IndexMap<String, Value>,
}

impl FixtureConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FixtureError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let config: FixtureConfig = serde_yaml::from_str(yaml)?;
        if config.schemas.is_empty() {
            return Err(FixtureError::Config("no schemas configured".to_string()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
seed: 42
stores:
  User: 10
schemas:
  User:
    type: object
    properties:
      id:
        type: integer
        minimum: 1
  Post:
    type: object
    properties:
      author:
        $ref: "User#/properties/id"
"#;
        let config = FixtureConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.stores.get("User"), Some(&10));
        let names: Vec<_> = config.schemas.keys().cloned().collect();
        assert_eq!(names, vec!["User", "Post"]);
        assert_eq!(
            config.schemas["Post"]["properties"]["author"],
            json!({ "$ref": "User#/properties/id" })
        );
    }

    #[test]
    fn test_optional_sections() {
        let config = FixtureConfig::from_yaml("schemas:\n  Flag: { type: boolean }\n").unwrap();
        assert_eq!(config.seed, None);
        assert!(config.stores.is_empty());
    }

    #[test]
    fn test_no_schemas_rejected() {
        assert!(matches!(
            FixtureConfig::from_yaml("seed: 1\n"),
            Err(FixtureError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            FixtureConfig::from_yaml("schemas: [unclosed"),
            Err(FixtureError::Yaml(_))
        ));
    }
}
