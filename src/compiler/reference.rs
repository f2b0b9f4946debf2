//! Lazy `$ref` nodes.
//!
//! A reference is never compiled into a subtree. The node keeps the target
//! (schema name and pointer) plus the sibling keywords of the referencing
//! node, and on every `generate()` call it re-reads the target from the
//! catalog, merges the siblings over it, compiles the result and generates
//! from it. Self-referential schemas therefore compile fine; generating from
//! one only terminates if an override cuts the recursion.

use super::{compile, CompileContext, Draft, GenContext, Generator, SharedGenerator};
use crate::error::FixtureError;
use schema_core::{merge, without_keyword, Reference};
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug)]
pub struct RefNode {
    /// Schema owning the pointer, already defaulted for local refs
    schema: String,
    reference: Reference,
    /// Sibling keywords of `$ref`, merged over the target
    overlay: Value,
}

impl RefNode {
    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    /// Resolve the target and merge the overlay over it.
    pub fn target(&self, ctx: &GenContext<'_>) -> Result<Value, FixtureError> {
        let mut target = ctx.catalog.resolve(&self.schema, &self.reference)?.clone();
        merge(&mut target, &self.overlay);
        Ok(target)
    }
}

impl Generator for RefNode {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        trace!(
            schema = %self.schema,
            pointer = %self.reference.pointer(),
            "re-resolving reference"
        );
        let catalog = ctx.catalog;
        let target = self.target(ctx)?;
        let cx = CompileContext::new(&self.schema, catalog.primitives());
        let generator = compile(&target, cx)?;
        generator.generate(ctx)
    }
}

pub fn compile_ref(node: &Value, raw: &str, cx: CompileContext<'_>) -> Result<SharedGenerator, FixtureError> {
    let reference = Reference::parse(raw)?;
    let schema = reference.schema_or(cx.schema).to_string();
    Ok(Arc::new(RefNode {
        schema,
        reference,
        overlay: without_keyword(node, "$ref"),
    }))
}
