//! Path-addressed overrides applied while materializing values.
//!
//! Callers address properties with dotted paths (`"address.city"`). Paths are
//! split into segments once, on insertion, and looked up by segment slice
//! while the materializer walks a draft.

use crate::catalog::Catalog;
use crate::compiler::{Draft, GenContext, SharedGenerator};
use crate::error::FixtureError;
use crate::fixture::Relation;
use schema_core::{merge, without_keyword, Reference};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Deepest `$ref` / property chain followed when checking override paths.
const MAX_PATH_DEPTH: usize = 32;

/// Replacement for the generator at one property path.
pub enum Override {
    /// Generated like any schema node; object drafts are flattened further
    Generator(SharedGenerator),
    /// Zero-argument value producer, called once per materialization
    Function(Box<dyn FnMut() -> Value + Send>),
    /// Constant value
    Value(Value),
}

impl Override {
    pub(crate) fn produce(&mut self, ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        match self {
            Override::Generator(generator) => generator.generate(ctx),
            Override::Function(produce) => Ok(Draft::Value(produce())),
            Override::Value(value) => Ok(Draft::Value(value.clone())),
        }
    }
}

impl fmt::Debug for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Override::Generator(generator) => f.debug_tuple("Generator").field(generator).finish(),
            Override::Function(_) => f.write_str("Function(..)"),
            Override::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl From<Value> for Override {
    fn from(value: Value) -> Self {
        Override::Value(value)
    }
}

impl From<SharedGenerator> for Override {
    fn from(generator: SharedGenerator) -> Self {
        Override::Generator(generator)
    }
}

/// Every materialization picks one existing record from the relation's store.
impl From<Relation> for Override {
    fn from(mut relation: Relation) -> Self {
        Override::Function(Box::new(move || relation.pick().as_ref().clone()))
    }
}

/// Overrides keyed by parsed property path.
#[derive(Debug, Default)]
pub struct Overrides {
    entries: HashMap<Vec<String>, Override>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the override for a dotted path, returning the one it replaces.
    pub fn insert(&mut self, path: &str, value: impl Into<Override>) -> Option<Override> {
        self.entries.insert(parse_path(path), value.into())
    }

    pub fn with(mut self, path: &str, value: impl Into<Override>) -> Self {
        self.insert(path, value);
        self
    }

    pub fn with_fn<F>(self, path: &str, produce: F) -> Self
    where
        F: FnMut() -> Value + Send + 'static,
    {
        self.with(path, Override::Function(Box::new(produce)))
    }

    pub fn with_value(self, path: &str, value: impl Into<Value>) -> Self {
        self.with(path, Override::Value(value.into()))
    }

    pub fn with_generator(self, path: &str, generator: SharedGenerator) -> Self {
        self.with(path, Override::Generator(generator))
    }

    pub fn get_mut(&mut self, path: &[String]) -> Option<&mut Override> {
        self.entries.get_mut(path)
    }

    pub fn contains(&self, path: &[String]) -> bool {
        self.entries.contains_key(path)
    }

    /// Registered paths, dot-joined and sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.entries.keys().map(|segments| segments.join(".")).collect();
        paths.sort();
        paths
    }

    pub(crate) fn segments(&self) -> impl Iterator<Item = &[String]> {
        self.entries.keys().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_path(path: &str) -> Vec<String> {
    path.split('.').map(str::to_string).collect()
}

/// Whether `segments` names a property reachable from `node`.
///
/// Follows `properties`, `$ref` targets and every combinator branch. Unknown
/// schemas and broken pointers simply make the path unreachable. For a root
/// of `"type": "array"` paths start at each element, so the walk begins in
/// `items` (every position of a tuple).
pub(crate) fn path_exists(node: &Value, schema: &str, catalog: &Catalog, segments: &[String]) -> bool {
    if node.get("type").and_then(Value::as_str) != Some("array") {
        return walk(node, schema, catalog, segments, 0);
    }
    match node.get("items") {
        Some(Value::Array(positions)) => positions
            .iter()
            .any(|item| walk(item, schema, catalog, segments, 0)),
        Some(item) => walk(item, schema, catalog, segments, 0),
        None => false,
    }
}

fn walk(node: &Value, schema: &str, catalog: &Catalog, segments: &[String], depth: usize) -> bool {
    let Some((head, rest)) = segments.split_first() else {
        return true;
    };
    if depth > MAX_PATH_DEPTH {
        return false;
    }

    if let Some(raw) = node.get("$ref").and_then(Value::as_str) {
        let Ok(reference) = Reference::parse(raw) else {
            return false;
        };
        let target_schema = reference.schema_or(schema).to_string();
        let Ok(target) = catalog.resolve(&target_schema, &reference) else {
            return false;
        };
        let mut target = target.clone();
        merge(&mut target, &without_keyword(node, "$ref"));
        return walk(&target, &target_schema, catalog, segments, depth + 1);
    }

    if let Some(property) = node.get("properties").and_then(|p| p.get(head.as_str())) {
        if walk(property, schema, catalog, rest, depth + 1) {
            return true;
        }
    }

    ["anyOf", "oneOf", "allOf"].iter().any(|keyword| {
        node.get(*keyword)
            .and_then(Value::as_array)
            .is_some_and(|branches| {
                branches
                    .iter()
                    .any(|branch| walk(branch, schema, catalog, segments, depth + 1))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn segments(path: &str) -> Vec<String> {
        parse_path(path)
    }

    #[test]
    fn test_paths_are_parsed_once() {
        let mut overrides = Overrides::new().with_value("address.city", "Paris");
        assert!(overrides.contains(&segments("address.city")));
        assert!(!overrides.contains(&segments("address")));
        assert!(overrides.get_mut(&segments("address.city")).is_some());
        assert_eq!(overrides.paths(), vec!["address.city"]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut overrides = Overrides::new();
        assert!(overrides.insert("a", json!(1)).is_none());
        let previous = overrides.insert("a", json!(2));
        assert!(matches!(previous, Some(Override::Value(v)) if v == json!(1)));
        assert_eq!(overrides.len(), 1);
    }

    #[test]
    fn test_function_override_is_called_each_time() {
        let catalog = Catalog::default();
        let mut counter = 0;
        let mut overrides = Overrides::new().with_fn("n", move || {
            counter += 1;
            json!(counter)
        });
        let mut rng = StdRng::seed_from_u64(42);
        let mut ctx = GenContext::new(&mut rng, &catalog);
        let entry = overrides.get_mut(&segments("n")).unwrap();
        for expected in 1..=3 {
            let draft = entry.produce(&mut ctx).unwrap();
            assert!(matches!(draft, Draft::Value(v) if v == json!(expected)));
        }
    }

    #[test]
    fn test_path_exists_follows_refs_and_combinators() {
        let mut catalog = Catalog::default();
        catalog.insert(
            "Address",
            json!({ "type": "object", "properties": { "city": { "type": "string" } } }),
        );
        let schema = json!({
            "type": "object",
            "properties": {
                "home": { "$ref": "Address" },
                "contact": {
                    "anyOf": [
                        { "properties": { "email": { "format": "email" } } },
                        { "properties": { "phone": { "type": "string" } } }
                    ]
                }
            }
        });

        assert!(path_exists(&schema, "Person", &catalog, &segments("home.city")));
        assert!(path_exists(&schema, "Person", &catalog, &segments("contact.phone")));
        assert!(!path_exists(&schema, "Person", &catalog, &segments("home.zip")));
        assert!(!path_exists(&schema, "Person", &catalog, &segments("work")));
    }

    #[test]
    fn test_path_exists_in_array_elements() {
        let catalog = Catalog::default();
        let list = json!({
            "type": "array",
            "items": { "type": "object", "properties": { "kind": { "type": "string" } } }
        });
        assert!(path_exists(&list, "Rows", &catalog, &segments("kind")));
        assert!(!path_exists(&list, "Rows", &catalog, &segments("items")));

        let tuple = json!({
            "type": "array",
            "items": [
                { "type": "integer" },
                { "type": "object", "properties": { "tag": { "type": "string" } } }
            ]
        });
        assert!(path_exists(&tuple, "Pair", &catalog, &segments("tag")));
        assert!(!path_exists(&tuple, "Pair", &catalog, &segments("kind")));
    }

    #[test]
    fn test_path_exists_stops_on_cycles() {
        let mut catalog = Catalog::default();
        let node = json!({
            "type": "object",
            "properties": { "child": { "$ref": "#" } }
        });
        catalog.insert("Node", node.clone());
        let deep = vec!["child".to_string(); MAX_PATH_DEPTH * 2];
        assert!(!path_exists(&node, "Node", &catalog, &deep));
        assert!(path_exists(&node, "Node", &catalog, &segments("child.child")));
    }
}
