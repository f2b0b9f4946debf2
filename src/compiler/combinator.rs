//! `anyOf`, `oneOf`, `allOf` and `type` unions.
//!
//! `oneOf` generates exactly like `anyOf`: each subschema is merged onto the
//! parent (minus the combinator keyword), compiled on its own, and one
//! candidate is picked uniformly per call. Exclusivity between candidates is
//! not enforced.

use super::{compile, CompileContext, Draft, GenContext, Generator, SharedGenerator};
use crate::error::FixtureError;
use primitive_generators::IndexGenerator;
use schema_core::{merge, without_keyword, TypeName};
use serde_json::Value;
use std::sync::Arc;

/// Uniform choice among compiled candidates.
#[derive(Debug)]
pub struct ChoiceNode {
    keyword: &'static str,
    candidates: Vec<SharedGenerator>,
    index: IndexGenerator,
}

impl ChoiceNode {
    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    pub fn candidates(&self) -> &[SharedGenerator] {
        &self.candidates
    }
}

impl Generator for ChoiceNode {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        let picked = self.index.pick(&mut *ctx.rng);
        self.candidates[picked].generate(ctx)
    }
}

/// All subschemas merged into one node and compiled once.
#[derive(Debug)]
pub struct AllOfNode {
    merged: SharedGenerator,
}

impl Generator for AllOfNode {
    fn generate(&self, ctx: &mut GenContext<'_>) -> Result<Draft, FixtureError> {
        self.merged.generate(ctx)
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        self.merged.validate(value)
    }
}

pub fn compile_choice(
    node: &Value,
    keyword: &'static str,
    subschemas: &[Value],
    cx: CompileContext<'_>,
) -> Result<SharedGenerator, FixtureError> {
    let base = without_keyword(node, keyword);
    let candidates = subschemas
        .iter()
        .map(|subschema| {
            let mut combined = base.clone();
            merge(&mut combined, subschema);
            compile(&combined, cx)
        })
        .collect::<Result<Vec<_>, _>>()?;
    choice(keyword, candidates, cx)
}

/// Sibling keywords form the base; subschemas merge over it left to right.
pub fn compile_all_of(
    node: &Value,
    subschemas: &[Value],
    cx: CompileContext<'_>,
) -> Result<SharedGenerator, FixtureError> {
    let mut combined = without_keyword(node, "allOf");
    for subschema in subschemas {
        merge(&mut combined, subschema);
    }
    Ok(Arc::new(AllOfNode {
        merged: compile(&combined, cx)?,
    }))
}

/// `"type": ["string", "null"]` picks one of the named types per call.
pub fn compile_type_union(
    node: &Value,
    types: &[TypeName],
    cx: CompileContext<'_>,
) -> Result<SharedGenerator, FixtureError> {
    let candidates = types
        .iter()
        .map(|type_name| {
            let mut single = node.clone();
            if let Value::Object(map) = &mut single {
                map.insert("type".to_string(), Value::from(type_name.as_str()));
            }
            compile(&single, cx)
        })
        .collect::<Result<Vec<_>, _>>()?;
    choice("type", candidates, cx)
}

fn choice(
    keyword: &'static str,
    candidates: Vec<SharedGenerator>,
    cx: CompileContext<'_>,
) -> Result<SharedGenerator, FixtureError> {
    let index = cx.primitives.index(candidates.len())?;
    Ok(Arc::new(ChoiceNode {
        keyword,
        candidates,
        index,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_any_of_values_match_a_candidate() {
        let node = json!({
            "anyOf": [
                { "type": "string", "pattern": "^s[0-9]$" },
                { "type": "integer", "minimum": 0, "maximum": 9 },
                { "type": "object", "properties": { "k": { "type": "boolean" } } }
            ]
        });
        let values = sample(&node, 100);
        for value in &values {
            let ok = match value {
                Value::String(s) => s.len() == 2 && s.starts_with('s'),
                Value::Number(n) => n.as_i64().is_some_and(|i| (0..=9).contains(&i)),
                Value::Object(o) => o.len() == 1 && o["k"].is_boolean(),
                _ => false,
            };
            assert!(ok, "{value} matches no candidate");
        }
        assert!(values.iter().any(Value::is_string));
        assert!(values.iter().any(Value::is_number));
        assert!(values.iter().any(Value::is_object));
    }

    #[test]
    fn test_choice_merges_parent_siblings() {
        let node = json!({
            "type": "integer",
            "minimum": 50,
            "maximum": 60,
            "oneOf": [{ "multipleOf": 5 }, { "maximum": 52 }]
        });
        for value in sample(&node, 50) {
            let v = value.as_i64().unwrap();
            assert!((50..=60).contains(&v));
            assert!(v % 5 == 0 || v <= 52, "unexpected {v}");
        }
    }

    #[test]
    fn test_choice_has_no_validator() {
        let node = json!({ "anyOf": [{ "type": "string" }, { "type": "null" }] });
        let generator = compile(&node, cx()).unwrap();
        assert_eq!(generator.validate(&json!("x")), None);
    }

    #[test]
    fn test_all_of_merges_left_to_right() {
        let node = json!({
            "allOf": [
                { "type": "object", "properties": { "a": { "type": "integer", "maximum": 100 } } },
                { "properties": { "b": { "type": "string", "maxLength": 3 } } },
                { "properties": { "a": { "minimum": 90 } } }
            ]
        });
        let generator = compile(&node, cx()).unwrap();
        for value in sample(&node, 30) {
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 2);
            assert!((90..=100).contains(&object["a"].as_i64().unwrap()));
            assert!(object["b"].as_str().unwrap().len() <= 3);
            assert_eq!(generator.validate(&value), Some(true));
        }
    }

    #[test]
    fn test_all_of_merges_tuple_positions() {
        let node = json!({
            "allOf": [
                { "type": "array", "items": [{ "type": "string" }, { "type": "integer" }] },
                { "items": [{ "maxLength": 3 }] }
            ]
        });
        for value in sample(&node, 30) {
            let items = value.as_array().unwrap();
            assert_eq!(items.len(), 2);
            assert!(items[0].as_str().is_some_and(|s| (1..=3).contains(&s.len())));
            assert!(items[1].is_i64());
        }
    }

    #[test]
    fn test_type_union() {
        let node = json!({ "type": ["string", "null"], "maxLength": 2 });
        let values = sample(&node, 60);
        assert!(values.iter().all(|v| v.is_null() || v.as_str().is_some_and(|s| s.len() <= 2)));
        assert!(values.iter().any(Value::is_null));
        assert!(values.iter().any(Value::is_string));
    }
}
