//! Named, compiled schemas.

use crate::catalog::Catalog;
use crate::compiler::{compile, CompileContext, SharedGenerator};
use crate::config::FixtureConfig;
use crate::error::FixtureError;
use crate::fixture::Fixture;
use crate::overrides::Overrides;
use primitive_generators::PrimitiveLibrary;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Registry of raw schemas and the generator tree compiled from each.
///
/// Registration happens up front; fixtures borrow the registry afterwards,
/// so every `$ref` sees the full set of registered schemas when it is
/// resolved at generation time.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    catalog: Catalog,
    compiled: HashMap<String, SharedGenerator>,
    /// Base seed for fixture RNGs; `None` means entropy
    seed: Option<u64>,
    /// Default store sizes per schema
    store_sizes: HashMap<String, usize>,
    /// Fixtures created so far, mixed into each fixture seed
    instances: AtomicU64,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose leaves come from a custom primitive library.
    pub fn with_primitives(primitives: Arc<dyn PrimitiveLibrary>) -> Self {
        Self {
            catalog: Catalog::new(primitives),
            ..Self::default()
        }
    }

    /// Make fixture output reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build a registry from a parsed configuration.
    ///
    /// Schemas are registered in document order. Every `stores` entry must
    /// name one of the configured schemas.
    pub fn from_config(config: &FixtureConfig) -> Result<Self, FixtureError> {
        let mut registry = Self::new();
        registry.seed = config.seed;

        for name in config.stores.keys() {
            if !config.schemas.contains_key(name) {
                return Err(FixtureError::Config(format!(
                    "store size given for unknown schema '{name}'"
                )));
            }
        }

        for (name, schema) in &config.schemas {
            registry.add_schema(name.clone(), schema.clone())?;
        }
        registry.store_sizes = config.stores.clone().into_iter().collect();

        info!(
            schemas = registry.compiled.len(),
            seeded = registry.seed.is_some(),
            "registry built from config"
        );
        Ok(registry)
    }

    /// Compile `schema` and register it under `name`.
    ///
    /// Local `#/...` pointers inside the schema resolve against `name`.
    /// Registering an existing name replaces both the raw schema and its
    /// generator. A schema that fails to compile is not recorded.
    pub fn add_schema(&mut self, name: impl Into<String>, schema: Value) -> Result<(), FixtureError> {
        let name = name.into();
        let generator = compile(&schema, CompileContext::new(&name, self.catalog.primitives()))?;

        let replaced = self.compiled.insert(name.clone(), generator).is_some();
        self.catalog.insert(name.clone(), schema);
        if replaced {
            warn!(schema = %name, "schema re-registered, previous generator replaced");
        } else {
            info!(schema = %name, "registered schema");
        }
        Ok(())
    }

    pub fn raw_schema(&self, name: &str) -> Option<&Arc<Value>> {
        self.catalog.get(name)
    }

    pub fn generator(&self, name: &str) -> Option<&SharedGenerator> {
        self.compiled.get(name)
    }

    /// Registered schema names, sorted.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.compiled.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Configured store size for `name`, 0 when none was configured.
    pub fn default_store_count(&self, name: &str) -> usize {
        self.store_sizes.get(name).copied().unwrap_or(0)
    }

    /// Fixture with no overrides, filled to the configured store size.
    pub fn fixture(&self, name: &str) -> Result<Fixture<'_>, FixtureError> {
        self.fixture_with(name, self.default_store_count(name), Overrides::new())
    }

    /// Fixture with its own overrides, eagerly filled to `store_count` values.
    pub fn fixture_with(
        &self,
        name: &str,
        store_count: usize,
        overrides: Overrides,
    ) -> Result<Fixture<'_>, FixtureError> {
        let generator = self
            .compiled
            .get(name)
            .cloned()
            .ok_or_else(|| FixtureError::SchemaNotFound(name.to_string()))?;
        let raw = self.catalog.require(name)?.clone();

        let mut fixture = Fixture::new(&self.catalog, name, generator, raw, overrides, self.instance_rng(name));
        for path in fixture.unknown_override_paths() {
            warn!(schema = %name, path = %path, "override path matches no property");
        }
        if store_count > 0 {
            fixture.fill_store(store_count)?;
        }
        Ok(fixture)
    }

    fn instance_rng(&self, name: &str) -> StdRng {
        let instance = self.instances.fetch_add(1, Ordering::Relaxed);
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(mix_seed(seed, name, instance)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Combine the base seed with the schema name and instance number.
fn mix_seed(seed: u64, name: &str, instance: u64) -> u64 {
    // FNV-1a
    let name_hash = name.bytes().fold(0xcbf29ce484222325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x100000001b3)
    });
    seed ^ name_hash.wrapping_add(instance.wrapping_mul(0x9E3779B97F4A7C15))
}
