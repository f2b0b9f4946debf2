//! Schema compiler.
//!
//! [`compile`] turns a raw schema node into a [`Generator`] tree. The node is
//! classified once (see [`schema_core::classify`]) and the resulting
//! [`SchemaKind`] picks exactly one of the node compilers:
//!
//! ```text
//! $ref ─────────────► reference::RefNode       (lazy, re-resolved per call)
//! anyOf / oneOf ────► combinator::ChoiceNode   (uniform pick)
//! allOf ────────────► combinator::AllOfNode    (merged once)
//! enum ─────────────► scalar::EnumNode
//! type / format /
//! properties / items ► container::* or scalar::*
//! (nothing) ────────► scalar::EmptyObjectNode
//! ```
//!
//! Generators return a [`Draft`]: objects hand back their child generators
//! instead of values so the materializer can apply path overrides while
//! flattening.

pub mod combinator;
pub mod container;
pub mod reference;
pub mod scalar;

use crate::catalog::Catalog;
use crate::error::FixtureError;
use primitive_generators::PrimitiveLibrary;
use rand::RngCore;
use schema_core::{classify, SchemaKind, TypeName};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A compiled schema node.
pub trait Generator: Send + Sync + fmt::Debug {
    /// Produce one draft value.
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError>;

    /// Best-effort check of a value. `None` when the node has no validator.
    fn validate(&self, _value: &Value) -> Option<bool> {
        None
    }
}

pub type SharedGenerator = Arc<dyn Generator>;

/// Output of one `generate()` call, possibly still holding generators.
#[derive(Debug, Clone)]
pub enum Draft {
    /// Concrete value
    Value(Value),
    /// Object whose properties are not generated yet
    Fields(Vec<(String, SharedGenerator)>),
    /// Array whose elements may not be generated yet
    Items(Vec<Draft>),
}

impl Draft {
    /// Generate everything still deferred. Overrides are not consulted.
    pub fn resolve(self, ctx: &mut GenContext<'_>) -> Result<Value, FixtureError> {
        match self {
            Draft::Value(value) => Ok(value),
            Draft::Fields(fields) => {
                let mut object = Map::new();
                for (name, generator) in fields {
                    let value = generator.generate(ctx)?.resolve(ctx)?;
                    object.insert(name, value);
                }
                Ok(Value::Object(object))
            }
            Draft::Items(items) => items
                .into_iter()
                .map(|item| item.resolve(ctx))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }
}

/// Everything a generator needs at generation time.
pub struct GenContext<'a> {
    pub rng: &'a mut dyn RngCore,
    pub catalog: &'a Catalog,
}

impl<'a> GenContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, catalog: &'a Catalog) -> Self {
        Self { rng, catalog }
    }
}

/// Everything the compiler needs: the schema that owns `#/...` pointers and
/// the primitive library that builds leaves.
#[derive(Clone, Copy)]
pub struct CompileContext<'a> {
    pub schema: &'a str,
    pub primitives: &'a dyn PrimitiveLibrary,
}

impl<'a> CompileContext<'a> {
    pub fn new(schema: &'a str, primitives: &'a dyn PrimitiveLibrary) -> Self {
        Self { schema, primitives }
    }
}

/// Compile one schema node.
pub fn compile(node: &Value, cx: CompileContext<'_>) -> Result<SharedGenerator, FixtureError> {
    let kind = classify(node)?;
    debug!(schema = cx.schema, kind = kind.label(), "compiling schema node");

    match kind {
        SchemaKind::Ref(raw) => reference::compile_ref(node, raw, cx),
        SchemaKind::AnyOf(subschemas) => combinator::compile_choice(node, "anyOf", subschemas, cx),
        SchemaKind::OneOf(subschemas) => combinator::compile_choice(node, "oneOf", subschemas, cx),
        SchemaKind::AllOf(subschemas) => combinator::compile_all_of(node, subschemas, cx),
        SchemaKind::Enum(values) => scalar::compile_enum(node, values, cx),
        SchemaKind::Type(type_name) => compile_type(node, type_name, cx),
        SchemaKind::TypeUnion(types) => combinator::compile_type_union(node, &types, cx),
        SchemaKind::Format(_) => compile_type(node, TypeName::String, cx),
        SchemaKind::Properties => compile_type(node, TypeName::Object, cx),
        SchemaKind::Items => compile_type(node, TypeName::Array, cx),
        SchemaKind::Empty => Ok(Arc::new(scalar::EmptyObjectNode)),
    }
}

fn compile_type(
    node: &Value,
    type_name: TypeName,
    cx: CompileContext<'_>,
) -> Result<SharedGenerator, FixtureError> {
    match type_name {
        TypeName::Object => container::compile_object(node, cx),
        TypeName::Array => container::compile_array(node, cx),
        TypeName::String => scalar::compile_string(node, cx),
        TypeName::Boolean | TypeName::Integer | TypeName::Number | TypeName::Null => {
            scalar::compile_primitive(node, type_name, cx)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use primitive_generators::StandardPrimitives;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub const PRIMITIVES: StandardPrimitives = StandardPrimitives;

    pub fn cx() -> CompileContext<'static> {
        CompileContext::new("Test", &PRIMITIVES)
    }

    /// Compile `node` and fully resolve `count` values with a seeded RNG.
    pub fn sample(node: &Value, count: usize) -> Vec<Value> {
        let catalog = Catalog::default();
        sample_with(node, &catalog, count)
    }

    pub fn sample_with(node: &Value, catalog: &Catalog, count: usize) -> Vec<Value> {
        let generator = compile(node, cx()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut ctx = GenContext::new(&mut rng, catalog);
        (0..count)
            .map(|_| generator.generate(&mut ctx).unwrap().resolve(&mut ctx).unwrap())
            .collect()
    }
}
