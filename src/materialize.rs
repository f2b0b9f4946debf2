//! Value materializer.
//!
//! Turns the [`Draft`] of a compiled root into a concrete value, consulting
//! [`Overrides`] at every object property on the way down:
//!
//! ```text
//! raw "type"          root draft handling
//! ──────────────────  ──────────────────────────────────────────────
//! "object" / absent   flatten fields, overrides keyed by dotted path
//! "array"             flatten each element on its own, paths restart
//! anything else       resolve directly, overrides ignored
//! ```
//!
//! Arrays met below the root are resolved without overrides; override paths
//! never cross an array index.

use crate::compiler::{Draft, GenContext, Generator};
use crate::error::FixtureError;
use crate::overrides::Overrides;
use serde_json::{Map, Value};
use tracing::debug;

/// Generate one value from `root`, shaped by the raw schema it was compiled from.
pub fn materialize(
    root: &dyn Generator,
    raw: &Value,
    overrides: &mut Overrides,
    ctx: &mut GenContext<'_>,
) -> Result<Value, FixtureError> {
    let draft = root.generate(ctx)?;
    match raw.get("type") {
        None | Some(Value::Null) => Flattener::new(overrides, ctx).flatten(draft),
        Some(Value::String(t)) if t == "object" => Flattener::new(overrides, ctx).flatten(draft),
        Some(Value::String(t)) if t == "array" => {
            let elements = match draft {
                Draft::Items(items) => items,
                Draft::Value(Value::Array(values)) => values.into_iter().map(Draft::Value).collect(),
                other => return other.resolve(ctx),
            };
            elements
                .into_iter()
                .map(|element| Flattener::new(overrides, ctx).flatten(element))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        Some(_) => draft.resolve(ctx),
    }
}

/// Walks one draft, tracking the property path from the root.
struct Flattener<'o, 'c, 'r> {
    overrides: &'o mut Overrides,
    ctx: &'c mut GenContext<'r>,
    path: Vec<String>,
}

impl<'o, 'c, 'r> Flattener<'o, 'c, 'r> {
    fn new(overrides: &'o mut Overrides, ctx: &'c mut GenContext<'r>) -> Self {
        Self {
            overrides,
            ctx,
            path: Vec::new(),
        }
    }

    fn flatten(&mut self, draft: Draft) -> Result<Value, FixtureError> {
        match draft {
            Draft::Fields(fields) => {
                let mut object = Map::new();
                for (name, generator) in fields {
                    self.path.push(name);
                    let child = match self.overridden()? {
                        Some(child) => child,
                        None => generator.generate(self.ctx)?,
                    };
                    let value = self.flatten(child)?;
                    if let Some(name) = self.path.pop() {
                        object.insert(name, value);
                    }
                }
                Ok(Value::Object(object))
            }
            Draft::Value(Value::Object(literal)) => {
                let mut object = Map::new();
                for (name, value) in literal {
                    self.path.push(name);
                    let child = self.overridden()?.unwrap_or(Draft::Value(value));
                    let value = self.flatten(child)?;
                    if let Some(name) = self.path.pop() {
                        object.insert(name, value);
                    }
                }
                Ok(Value::Object(object))
            }
            Draft::Value(value) => Ok(value),
            Draft::Items(items) => Draft::Items(items).resolve(self.ctx),
        }
    }

    /// Draft produced by the override at the current path, if there is one.
    fn overridden(&mut self) -> Result<Option<Draft>, FixtureError> {
        let Some(entry) = self.overrides.get_mut(&self.path) else {
            return Ok(None);
        };
        debug!(path = %self.path.join("."), "applying override");
        entry.produce(self.ctx).map(Some)
    }
}
