//! Schema Fixtures Library
//!
//! Compiles JSON-Schema-like documents into generators of schema-conformant
//! values, and keeps pools of generated records ("stores") that other
//! fixtures can reference.
//!
//! # Features
//!
//! - Keyword dispatch: `$ref`, `anyOf`, `allOf`, `oneOf`, `enum`, `type`,
//!   `format`, `properties` and `items`, first match wins
//! - Lazy references: `$ref` targets are re-read on every generation, so
//!   self-referential schemas compile
//! - Path overrides: replace any property by dotted path with a constant, a
//!   closure or another generator
//! - Stores and relations: pre-generate records and pick existing ones to
//!   model foreign keys between fixtures
//! - Reproducible output: seeded registries produce identical values
//!
//! # Architecture
//!
//! ```text
//! SchemaRegistry::add_schema ──► compiler::compile ──► Generator tree
//!                                                          │
//! SchemaRegistry::fixture ──► Fixture ──► materialize ◄────┘
//!                               │            ▲
//!                               │            └── Overrides
//!                               └─► fill_store ──► relation() ──► Relation
//! ```
//!
//! Primitive leaves (numbers, strings, formats, patterns) come from the
//! `primitive_generators` crate; schema keyword handling lives in
//! `schema_core`.
//!
//! # Example
//!
//! ```
//! use schema_fixtures::{Overrides, SchemaRegistry};
//! use serde_json::json;
//!
//! let mut registry = SchemaRegistry::new().with_seed(42);
//! registry
//!     .add_schema(
//!         "User",
//!         json!({
//!             "type": "object",
//!             "properties": {
//!                 "id": { "type": "integer", "minimum": 1 },
//!                 "email": { "type": "string", "format": "email" }
//!             }
//!         }),
//!     )
//!     .unwrap();
//!
//! let overrides = Overrides::new().with_value("email", "admin@example.com");
//! let mut users = registry.fixture_with("User", 0, overrides).unwrap();
//! let user = users.generate().unwrap();
//! assert_eq!(user["email"], "admin@example.com");
//! ```

pub mod catalog;
pub mod compiler;
pub mod config;
pub mod error;
pub mod fixture;
pub mod materialize;
pub mod overrides;
pub mod registry;

// Re-exports for convenience
pub use catalog::Catalog;
pub use compiler::{compile, CompileContext, Draft, GenContext, Generator, SharedGenerator};
pub use config::FixtureConfig;
pub use error::FixtureError;
pub use fixture::{Fixture, Relation};
pub use materialize::materialize;
pub use overrides::{Override, Overrides};
pub use registry::SchemaRegistry;

pub use primitive_generators::{PrimitiveLibrary, StandardPrimitives};
pub use schema_core::{Reference, SchemaError};
