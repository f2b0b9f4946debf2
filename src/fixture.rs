//! Fixture instances, their stores and relations between stores.

use crate::catalog::Catalog;
use crate::compiler::{GenContext, SharedGenerator};
use crate::error::FixtureError;
use crate::materialize::materialize;
use crate::overrides::{path_exists, Overrides};
use primitive_generators::IndexGenerator;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Filled values plus the index picker bounded by their count.
#[derive(Debug, Default)]
struct StoreState {
    /// Never shrunk or regenerated
    entries: Vec<Arc<Value>>,
    /// Rebuilt by every fill that grows the store
    index: Option<IndexGenerator>,
}

/// Store shared between a fixture and the relations taken from it.
#[derive(Debug, Clone, Default)]
struct SharedStore(Arc<RwLock<StoreState>>);

impl SharedStore {
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One compiled schema bound to its own overrides, RNG and store.
///
/// Created through [`SchemaRegistry::fixture`](crate::SchemaRegistry::fixture)
/// or [`SchemaRegistry::fixture_with`](crate::SchemaRegistry::fixture_with).
#[derive(Debug)]
pub struct Fixture<'r> {
    catalog: &'r Catalog,
    name: String,
    generator: SharedGenerator,
    raw: Arc<Value>,
    overrides: Overrides,
    rng: StdRng,
    store: SharedStore,
}

impl<'r> Fixture<'r> {
    pub(crate) fn new(
        catalog: &'r Catalog,
        name: &str,
        generator: SharedGenerator,
        raw: Arc<Value>,
        overrides: Overrides,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            name: name.to_string(),
            generator,
            raw,
            overrides,
            rng,
            store: SharedStore::default(),
        }
    }

    /// Reseed this fixture's RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Materialize one value. The store is left untouched.
    pub fn generate(&mut self) -> Result<Value, FixtureError> {
        let mut ctx = GenContext::new(&mut self.rng, self.catalog);
        materialize(self.generator.as_ref(), &self.raw, &mut self.overrides, &mut ctx)
    }

    /// Grow the store to `count` values and rebound its index picker.
    ///
    /// A `count` at or below the current length changes nothing. Relations
    /// already taken from this fixture see the new entries.
    pub fn fill_store(&mut self, count: usize) -> Result<(), FixtureError> {
        let current = self.store.read().entries.len();
        if count <= current {
            debug!(schema = %self.name, count, current, "store already filled");
            return Ok(());
        }

        let mut added = Vec::with_capacity(count - current);
        for _ in current..count {
            added.push(Arc::new(self.generate()?));
        }
        let index = self.catalog.primitives().index(count)?;

        let mut state = self.store.write();
        state.entries.extend(added);
        state.index = Some(index);
        drop(state);

        info!(schema = %self.name, count, added = count - current, "filled store");
        Ok(())
    }

    /// Current store contents.
    pub fn store(&self) -> Vec<Arc<Value>> {
        self.store.read().entries.clone()
    }

    pub fn store_len(&self) -> usize {
        self.store.read().entries.len()
    }

    /// Picker over this fixture's store.
    ///
    /// The relation reads the live store on every pick, so entries added by
    /// later fills can be returned too.
    pub fn relation(&mut self) -> Result<Relation, FixtureError> {
        if self.store.read().entries.is_empty() {
            return Err(FixtureError::EmptyStore(self.name.clone()));
        }
        Ok(Relation {
            schema: self.name.clone(),
            store: self.store.clone(),
            rng: StdRng::seed_from_u64(self.rng.next_u64()),
        })
    }

    /// Override paths that name no property of this fixture's schema.
    pub fn unknown_override_paths(&self) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .overrides
            .segments()
            .filter(|segments| !path_exists(&self.raw, &self.name, self.catalog, segments))
            .map(|segments| segments.join("."))
            .collect();
        unknown.sort();
        unknown
    }
}

/// Uniform picker over one fixture's store.
///
/// Never generates: every pick is an entry that is already in the store.
/// Only created for non-empty stores, and stores never shrink.
#[derive(Debug, Clone)]
pub struct Relation {
    schema: String,
    store: SharedStore,
    rng: StdRng,
}

impl Relation {
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.store.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().entries.is_empty()
    }

    pub fn pick(&mut self) -> Arc<Value> {
        let state = self.store.read();
        let picked = state.index.map_or(0, |index| index.pick(&mut self.rng));
        Arc::clone(&state.entries[picked])
    }

    /// The relation as a plain closure.
    pub fn into_fn(mut self) -> impl FnMut() -> Arc<Value> + Send {
        move || self.pick()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::FixtureError;
    use crate::registry::SchemaRegistry;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new().with_seed(42);
        registry
            .add_schema(
                "User",
                json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "email": { "type": "string", "format": "email" }
                    }
                }),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_fill_store_grows_only() {
        let registry = registry();
        let mut users = registry.fixture("User").unwrap();
        assert!(users.store().is_empty());

        users.fill_store(3).unwrap();
        let first: Vec<_> = users.store().to_vec();
        assert_eq!(first.len(), 3);

        users.fill_store(2).unwrap();
        assert_eq!(users.store().len(), 3);

        users.fill_store(5).unwrap();
        assert_eq!(users.store_len(), 5);
        for (before, after) in first.iter().zip(users.store().iter()) {
            assert!(Arc::ptr_eq(before, after));
        }
    }

    #[test]
    fn test_generate_leaves_store_alone() {
        let registry = registry();
        let mut users = registry.fixture("User").unwrap();
        users.generate().unwrap();
        assert!(users.store().is_empty());
    }

    #[test]
    fn test_relation_requires_filled_store() {
        let registry = registry();
        let mut users = registry.fixture("User").unwrap();
        assert!(matches!(users.relation(), Err(FixtureError::EmptyStore(name)) if name == "User"));
    }

    #[test]
    fn test_relation_returns_stored_entries() {
        let registry = registry();
        let mut users = registry.fixture_with("User", 4, Default::default()).unwrap();
        let mut relation = users.relation().unwrap();
        assert_eq!(relation.len(), 4);
        for _ in 0..50 {
            let picked = relation.pick();
            assert!(users.store().iter().any(|entry| Arc::ptr_eq(entry, &picked)));
        }
    }

    #[test]
    fn test_relation_follows_later_fills() {
        let registry = registry();
        let mut users = registry.fixture_with("User", 2, Default::default()).unwrap();
        let mut relation = users.relation().unwrap();
        let first_fill = users.store();

        users.fill_store(10).unwrap();
        assert_eq!(relation.len(), 10);

        let store = users.store();
        let mut reached = HashSet::new();
        for _ in 0..500 {
            let picked = relation.pick();
            let position = store
                .iter()
                .position(|entry| Arc::ptr_eq(entry, &picked))
                .expect("picked value is a stored entry");
            reached.insert(position);
        }
        assert!(reached.iter().any(|&position| position >= first_fill.len()));
        assert_eq!(reached.len(), 10);
    }

    #[test]
    fn test_unknown_override_paths() {
        let registry = registry();
        let overrides = crate::Overrides::new()
            .with_value("email", "a@b.c")
            .with_value("profile.age", 3);
        let users = registry.fixture_with("User", 0, overrides).unwrap();
        assert_eq!(users.unknown_override_paths(), vec!["profile.age"]);
    }

    #[test]
    fn test_override_paths_checked_per_array_element() {
        let mut registry = SchemaRegistry::new().with_seed(42);
        registry
            .add_schema(
                "Rows",
                json!({
                    "type": "array",
                    "minItems": 1,
                    "items": { "type": "object", "properties": { "kind": { "type": "string" } } }
                }),
            )
            .unwrap();
        let overrides = crate::Overrides::new()
            .with_value("kind", "row")
            .with_value("missing", 1);
        let mut rows = registry.fixture_with("Rows", 0, overrides).unwrap();
        assert_eq!(rows.unknown_override_paths(), vec!["missing"]);
        let value = rows.generate().unwrap();
        assert!(value.as_array().unwrap().iter().all(|row| row["kind"] == "row"));
    }
}
