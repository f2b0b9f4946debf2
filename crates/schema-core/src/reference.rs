//! `$ref` pointer parsing and lookup.
//!
//! Accepted forms:
//!
//! - `Name#/a/b` - pointer into the registered schema `Name`
//! - `#/a/b` - pointer into the schema currently being compiled
//! - `Name#` or `Name` - the whole registered schema `Name`
//!
//! Pointer segments use JSON Pointer escaping (`~1` for `/`, `~0` for `~`)
//! and numeric segments index into arrays.

use crate::error::SchemaError;
use serde_json::Value;
use std::fmt;

/// A parsed `$ref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Target schema name, `None` for a local pointer
    pub schema: Option<String>,
    /// Path segments, unescaped
    pub segments: Vec<String>,
}

impl Reference {
    pub fn parse(raw: &str) -> Result<Self, SchemaError> {
        let (schema, pointer) = match raw.split_once('#') {
            Some((schema, pointer)) => (schema, pointer),
            None => (raw, ""),
        };

        if schema.is_empty() && !raw.contains('#') {
            return Err(SchemaError::InvalidRef(raw.to_string()));
        }
        if pointer.contains('#') {
            return Err(SchemaError::InvalidRef(raw.to_string()));
        }

        let trimmed = pointer.trim_start_matches('/').trim_end_matches('/');
        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').map(unescape).collect()
        };

        Ok(Self {
            schema: (!schema.is_empty()).then(|| schema.to_string()),
            segments,
        })
    }

    /// The target schema name, falling back to `current` for local pointers.
    pub fn schema_or<'a>(&'a self, current: &'a str) -> &'a str {
        self.schema.as_deref().unwrap_or(current)
    }

    /// Follow the pointer through `document`, one key at a time.
    ///
    /// `schema_name` is only used for error reporting.
    pub fn lookup<'v>(&self, document: &'v Value, schema_name: &str) -> Result<&'v Value, SchemaError> {
        let mut node = document;
        for segment in &self.segments {
            let next = match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            node = next.ok_or_else(|| SchemaError::PointerNotFound {
                schema: schema_name.to_string(),
                pointer: self.pointer(),
                segment: segment.clone(),
            })?;
        }
        Ok(node)
    }

    /// The pointer part, re-escaped.
    pub fn pointer(&self) -> String {
        let mut pointer = String::from("#");
        for segment in &self.segments {
            pointer.push('/');
            pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        }
        pointer
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            f.write_str(schema)?;
        }
        f.write_str(&self.pointer())
    }
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
