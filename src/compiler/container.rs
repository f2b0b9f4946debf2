//! Object and array nodes.

use super::{compile, CompileContext, Draft, GenContext, Generator, SharedGenerator};
use crate::error::FixtureError;
use primitive_generators::ArrayGenerator;
use schema_core::{Constraints, SchemaError};
use serde_json::{json, Value};
use std::sync::Arc;

/// Object with one child generator per property, in `properties` order.
///
/// `generate()` hands back the children unevaluated; the materializer
/// flattens them so overrides can be applied per property path.
#[derive(Debug)]
pub struct ObjectNode {
    fields: Vec<(String, SharedGenerator)>,
}

impl Generator for ObjectNode {
    fn generate(&self, _ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        Ok(Draft::Fields(self.fields.clone()))
    }

    /// Every property validator must pass; properties without one pass.
    fn validate(&self, value: &Value) -> Option<bool> {
        let Value::Object(object) = value else {
            return Some(false);
        };
        Some(self.fields.iter().all(|(name, generator)| {
            let property = object.get(name).unwrap_or(&Value::Null);
            generator.validate(property).unwrap_or(true)
        }))
    }
}

/// Fixed-length array, one generator per position.
#[derive(Debug)]
pub struct TupleNode {
    items: Vec<SharedGenerator>,
}

impl Generator for TupleNode {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        let items = self
            .items
            .iter()
            .map(|item| item.generate(ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Draft::Items(items))
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        let Value::Array(values) = value else {
            return Some(false);
        };
        Some(self.items.iter().enumerate().all(|(position, generator)| {
            let element = values.get(position).unwrap_or(&Value::Null);
            generator.validate(element).unwrap_or(true)
        }))
    }
}

/// Variable-length array of one repeated item schema.
#[derive(Debug)]
pub struct ListNode {
    item: SharedGenerator,
    array: ArrayGenerator,
}

impl Generator for ListNode {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        let catalog = ctx.catalog;
        let items = self.array.fill_with(&mut *ctx.rng, |rng| {
            self.item.generate(&mut GenContext::new(rng, catalog))
        })?;
        Ok(Draft::Items(items))
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        let Value::Array(values) = value else {
            return Some(false);
        };
        let items_valid = values
            .iter()
            .all(|element| self.item.validate(element).unwrap_or(true));
        Some(self.array.validate_length(values.len()) && items_valid)
    }
}

pub fn compile_object(node: &Value, cx: CompileContext<'_>) -> Result<SharedGenerator, FixtureError> {
    let fields = match node.get("properties") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(properties)) => properties
            .iter()
            .map(|(name, property)| Ok((name.clone(), compile(property, cx)?)))
            .collect::<Result<Vec<_>, FixtureError>>()?,
        Some(_) => {
            return Err(SchemaError::InvalidKeyword {
                keyword: "properties",
                reason: "expected an object of schemas".to_string(),
            }
            .into())
        }
    };
    Ok(Arc::new(ObjectNode { fields }))
}

/// An `items` list is a tuple; anything else is the schema of every element.
pub fn compile_array(node: &Value, cx: CompileContext<'_>) -> Result<SharedGenerator, FixtureError> {
    match node.get("items") {
        Some(Value::Array(positions)) => {
            let items = positions
                .iter()
                .map(|item| compile(item, cx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Arc::new(TupleNode { items }))
        }
        items => {
            let item_schema = match items {
                Some(schema) if !schema.is_null() => schema.clone(),
                _ => json!({}),
            };
            let constraints = Constraints::from_node(node)?;
            Ok(Arc::new(ListNode {
                item: compile(&item_schema, cx)?,
                array: cx.primitives.array(&constraints)?,
            }))
        }
    }
}
