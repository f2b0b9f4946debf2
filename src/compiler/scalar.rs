//! Leaf nodes: primitives, strings, enums and the empty fallback.

use super::{CompileContext, Draft, GenContext, Generator, SharedGenerator};
use crate::error::FixtureError;
use primitive_generators::{BoxedPrimitive, IndexGenerator};
use schema_core::{Constraints, SchemaError, TypeName};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Wraps a generator from the primitive library.
#[derive(Debug)]
pub struct PrimitiveNode {
    inner: BoxedPrimitive,
}

impl PrimitiveNode {
    pub fn new(inner: BoxedPrimitive) -> Self {
        Self { inner }
    }
}

impl Generator for PrimitiveNode {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        Ok(Draft::Value(self.inner.generate(&mut *ctx.rng)))
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        self.inner.validate(value)
    }
}

/// Uniform pick from a fixed list of values.
#[derive(Debug)]
pub struct EnumNode {
    values: Vec<Value>,
    index: IndexGenerator,
}

impl EnumNode {
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Generator for EnumNode {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        let picked = self.index.pick(&mut *ctx.rng);
        Ok(Draft::Value(self.values[picked].clone()))
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        Some(self.values.contains(value))
    }
}

/// Fallback for nodes with no recognized keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyObjectNode;

impl Generator for EmptyObjectNode {
    fn generate(&self, _ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        Ok(Draft::Value(Value::Object(Map::new())))
    }

    fn validate(&self, _value: &Value) -> Option<bool> {
        Some(true)
    }
}

pub fn compile_primitive(
    node: &Value,
    type_name: TypeName,
    cx: CompileContext<'_>,
) -> Result<SharedGenerator, FixtureError> {
    let constraints = Constraints::from_node(node)?;
    let lib = cx.primitives;
    let inner = match type_name {
        TypeName::Boolean => lib.boolean(&constraints)?,
        TypeName::Integer => lib.integer(&constraints)?,
        TypeName::Number => lib.number(&constraints)?,
        TypeName::Null => lib.null(&constraints)?,
        TypeName::String => lib.string(&constraints)?,
        TypeName::Array | TypeName::Object => {
            return Err(SchemaError::InvalidKeyword {
                keyword: "type",
                reason: format!("'{type_name}' is not a primitive type"),
            }
            .into())
        }
    };
    Ok(Arc::new(PrimitiveNode::new(inner)))
}

/// `pattern` wins over `format`, which wins over a plain string.
pub fn compile_string(node: &Value, cx: CompileContext<'_>) -> Result<SharedGenerator, FixtureError> {
    let constraints = Constraints::from_node(node)?;
    let inner = if let Some(pattern) = &constraints.pattern {
        cx.primitives.pattern(pattern, &constraints)?
    } else if let Some(format) = &constraints.format {
        cx.primitives.format(format, &constraints)?
    } else {
        cx.primitives.string(&constraints)?
    };
    Ok(Arc::new(PrimitiveNode::new(inner)))
}

/// Enum values are filtered to the declared `type` (if any) before picking.
pub fn compile_enum(
    node: &Value,
    values: &[Value],
    cx: CompileContext<'_>,
) -> Result<SharedGenerator, FixtureError> {
    let declared = declared_types(node)?;
    let values: Vec<Value> = match &declared {
        Some(types) => values
            .iter()
            .filter(|value| types.iter().any(|t| t.matches(value)))
            .cloned()
            .collect(),
        None => values.to_vec(),
    };

    if values.is_empty() {
        let type_label = declared
            .map(|types| {
                types
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .unwrap_or_else(|| "any".to_string());
        return Err(SchemaError::EmptyEnum(type_label).into());
    }

    let index = cx.primitives.index(values.len())?;
    Ok(Arc::new(EnumNode { values, index }))
}

fn declared_types(node: &Value) -> Result<Option<Vec<TypeName>>, FixtureError> {
    let types = match node.get("type") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(name)) => vec![name.parse::<TypeName>()?],
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .map(str::parse)
            .collect::<Result<Vec<TypeName>, _>>()?,
        Some(_) => {
            return Err(SchemaError::InvalidKeyword {
                keyword: "type",
                reason: "expected a string or an array of strings".to_string(),
            }
            .into())
        }
    };
    Ok(Some(types))
}
