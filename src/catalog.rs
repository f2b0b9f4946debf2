//! Raw schema storage shared by compilation and generation.

use crate::error::FixtureError;
use primitive_generators::{PrimitiveLibrary, StandardPrimitives};
use schema_core::Reference;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Registered raw schemas plus the primitive library that compiles leaves.
///
/// Reference nodes read the catalog on every `generate()` call, so a schema
/// referenced by name only needs to be registered before generation starts.
#[derive(Debug, Clone)]
pub struct Catalog {
    schemas: HashMap<String, Arc<Value>>,
    primitives: Arc<dyn PrimitiveLibrary>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Arc::new(StandardPrimitives))
    }
}

impl Catalog {
    pub fn new(primitives: Arc<dyn PrimitiveLibrary>) -> Self {
        Self {
            schemas: HashMap::new(),
            primitives,
        }
    }

    /// Record a raw schema, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, schema: Value) -> Arc<Value> {
        let schema = Arc::new(schema);
        self.schemas.insert(name.into(), Arc::clone(&schema));
        schema
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Value>> {
        self.schemas.get(name)
    }

    /// Like [`Catalog::get`], failing with `SchemaNotFound`.
    pub fn require(&self, name: &str) -> Result<&Arc<Value>, FixtureError> {
        self.get(name)
            .ok_or_else(|| FixtureError::SchemaNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Follow `reference` into the schema `schema`.
    pub fn resolve(&self, schema: &str, reference: &Reference) -> Result<&Value, FixtureError> {
        let document = self.require(schema)?;
        Ok(reference.lookup(document, schema)?)
    }

    pub fn primitives(&self) -> &dyn PrimitiveLibrary {
        self.primitives.as_ref()
    }
}
