//! Typed view of the constraint keywords consumed by primitive generators.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `exclusiveMinimum` / `exclusiveMaximum` in either draft form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Exclusive {
    /// Draft 4: modifies `minimum` / `maximum`
    Flag(bool),
    /// Draft 6+: a bound of its own
    Bound(f64),
}

/// A resolved numeric bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub value: f64,
    pub exclusive: bool,
}

/// Constraint keywords of a schema node. Unknown keywords are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<Exclusive>,
    pub exclusive_maximum: Option<Exclusive>,
    pub multiple_of: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

impl Constraints {
    /// Read constraints from a schema node; non-object nodes have none.
    pub fn from_node(node: &Value) -> Result<Self, SchemaError> {
        if !node.is_object() {
            return Ok(Self::default());
        }
        Ok(Self::deserialize(node)?)
    }

    /// Effective lower bound.
    pub fn lower(&self) -> Option<Bound> {
        resolve_bound(self.minimum, self.exclusive_minimum, f64::max)
    }

    /// Effective upper bound.
    pub fn upper(&self) -> Option<Bound> {
        resolve_bound(self.maximum, self.exclusive_maximum, f64::min)
    }
}

fn resolve_bound(
    inclusive: Option<f64>,
    exclusive: Option<Exclusive>,
    stricter: fn(f64, f64) -> f64,
) -> Option<Bound> {
    match (inclusive, exclusive) {
        (Some(value), Some(Exclusive::Flag(flag))) => Some(Bound {
            value,
            exclusive: flag,
        }),
        (Some(value), Some(Exclusive::Bound(bound))) => {
            let tighter = stricter(value, bound);
            Some(Bound {
                value: tighter,
                exclusive: tighter == bound,
            })
        }
        (None, Some(Exclusive::Bound(value))) => Some(Bound {
            value,
            exclusive: true,
        }),
        (Some(value), None) => Some(Bound {
            value,
            exclusive: false,
        }),
        (None, _) => None,
    }
}
