//! Shared helpers for integration tests.

#![allow(dead_code)]

use schema_fixtures::SchemaRegistry;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once; `RUST_LOG` controls the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Seeded registry with the given schemas registered in order.
pub fn registry(schemas: &[(&str, Value)]) -> SchemaRegistry {
    init_tracing();
    let mut registry = SchemaRegistry::new().with_seed(42);
    for (name, schema) in schemas {
        registry
            .add_schema(*name, schema.clone())
            .unwrap_or_else(|e| panic!("failed to register {name}: {e}"));
    }
    registry
}

/// Generate `count` values from a fresh fixture of `name`.
pub fn generate_many(registry: &SchemaRegistry, name: &str, count: usize) -> Vec<Value> {
    let mut fixture = registry.fixture(name).unwrap();
    (0..count).map(|_| fixture.generate().unwrap()).collect()
}
