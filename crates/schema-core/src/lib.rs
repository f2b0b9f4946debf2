//! Core schema helpers for the schema-fixtures generator.
//!
//! Raw schema documents are kept as `serde_json::Value` trees. This crate
//! provides the pieces every other crate needs to reason about them:
//!
//! - [`SchemaKind`] - The single dispatch discriminant computed for a node
//! - [`Keyword`] / [`PRECEDENCE`] - The keyword precedence table
//! - [`Reference`] - Parsed `$ref` pointers and their lookup
//! - [`Constraints`] - Typed view of the numeric/string/array constraints
//! - [`merge`] / [`merged`] - Structural deep merge of schema nodes
//!
//! # Architecture
//!
//! ```text
//! schema-core (this crate)
//!    │
//!    ├─── primitive-generators  (reads Constraints)
//!    │
//!    └─── schema-fixtures       (classifies, merges and resolves nodes)
//! ```

pub mod constraints;
pub mod error;
pub mod kind;
pub mod merge;
pub mod reference;

// Re-exports for convenience
pub use constraints::{Bound, Constraints, Exclusive};
pub use error::SchemaError;
pub use kind::{classify, Keyword, SchemaKind, TypeName, PRECEDENCE};
pub use merge::{merge, merged, without_keyword};
pub use reference::Reference;
