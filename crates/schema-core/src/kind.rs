//! Keyword precedence and schema node classification.
//!
//! Every schema node compiles to exactly one generator. Which one is decided
//! by the first keyword of [`PRECEDENCE`] present on the node; [`classify`]
//! folds that decision into a single [`SchemaKind`] so the compiler can
//! `match` on it once.

use crate::error::SchemaError;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Schema keywords that take part in dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Ref,
    AnyOf,
    AllOf,
    OneOf,
    Enum,
    Type,
    Format,
    Properties,
    Items,
}

/// Dispatch order, first match wins.
pub const PRECEDENCE: [Keyword; 9] = [
    Keyword::Ref,
    Keyword::AnyOf,
    Keyword::AllOf,
    Keyword::OneOf,
    Keyword::Enum,
    Keyword::Type,
    Keyword::Format,
    Keyword::Properties,
    Keyword::Items,
];

impl Keyword {
    /// The keyword as spelled in a schema document.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Ref => "$ref",
            Keyword::AnyOf => "anyOf",
            Keyword::AllOf => "allOf",
            Keyword::OneOf => "oneOf",
            Keyword::Enum => "enum",
            Keyword::Type => "type",
            Keyword::Format => "format",
            Keyword::Properties => "properties",
            Keyword::Items => "items",
        }
    }

    /// A keyword is present when its key exists with a non-null value.
    pub fn is_present(self, node: &Map<String, Value>) -> bool {
        node.get(self.as_str()).is_some_and(|value| !value.is_null())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven JSON Schema type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Array,
    Boolean,
    Integer,
    Number,
    Null,
    Object,
    String,
}

impl TypeName {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::Array => "array",
            TypeName::Boolean => "boolean",
            TypeName::Integer => "integer",
            TypeName::Number => "number",
            TypeName::Null => "null",
            TypeName::Object => "object",
            TypeName::String => "string",
        }
    }

    /// Check whether a value's runtime type is this type.
    ///
    /// `integer` accepts any number without a fractional part; `number`
    /// accepts every number.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            TypeName::Array => value.is_array(),
            TypeName::Boolean => value.is_boolean(),
            TypeName::Integer => match value {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
            TypeName::Number => value.is_number(),
            TypeName::Null => value.is_null(),
            TypeName::Object => value.is_object(),
            TypeName::String => value.is_string(),
        }
    }
}

impl FromStr for TypeName {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "array" => Ok(TypeName::Array),
            "boolean" => Ok(TypeName::Boolean),
            "integer" => Ok(TypeName::Integer),
            "number" => Ok(TypeName::Number),
            "null" => Ok(TypeName::Null),
            "object" => Ok(TypeName::Object),
            "string" => Ok(TypeName::String),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a schema node compiles to.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind<'a> {
    /// `$ref` pointer, resolved lazily at generation time
    Ref(&'a str),
    /// `anyOf` subschemas (non-empty)
    AnyOf(&'a [Value]),
    /// `allOf` subschemas (non-empty)
    AllOf(&'a [Value]),
    /// `oneOf` subschemas (non-empty)
    OneOf(&'a [Value]),
    /// `enum` values
    Enum(&'a [Value]),
    /// A single declared `type`
    Type(TypeName),
    /// `type` declared as a list of names
    TypeUnion(Vec<TypeName>),
    /// `format` without `type`, generated as a string
    Format(&'a str),
    /// `properties` without `type`, generated as an object
    Properties,
    /// `items` without `type`, generated as an array
    Items,
    /// Nothing recognized; generates an empty object
    Empty,
}

impl SchemaKind<'_> {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            SchemaKind::Ref(_) => "ref",
            SchemaKind::AnyOf(_) => "anyOf",
            SchemaKind::AllOf(_) => "allOf",
            SchemaKind::OneOf(_) => "oneOf",
            SchemaKind::Enum(_) => "enum",
            SchemaKind::Type(t) => t.as_str(),
            SchemaKind::TypeUnion(_) => "type-union",
            SchemaKind::Format(_) => "format",
            SchemaKind::Properties => "properties",
            SchemaKind::Items => "items",
            SchemaKind::Empty => "empty",
        }
    }
}

/// Classify a schema node by keyword precedence.
///
/// Non-object nodes (e.g. the boolean schema `true`) classify as
/// [`SchemaKind::Empty`].
pub fn classify(node: &Value) -> Result<SchemaKind<'_>, SchemaError> {
    let Some(map) = node.as_object() else {
        return Ok(SchemaKind::Empty);
    };

    let Some(keyword) = PRECEDENCE.into_iter().find(|k| k.is_present(map)) else {
        return Ok(SchemaKind::Empty);
    };

    let value = &map[keyword.as_str()];
    match keyword {
        Keyword::Ref => value
            .as_str()
            .map(SchemaKind::Ref)
            .ok_or_else(|| invalid(keyword, "expected a string")),
        Keyword::AnyOf => subschemas(keyword, value).map(SchemaKind::AnyOf),
        Keyword::AllOf => subschemas(keyword, value).map(SchemaKind::AllOf),
        Keyword::OneOf => subschemas(keyword, value).map(SchemaKind::OneOf),
        Keyword::Enum => value
            .as_array()
            .map(|values| SchemaKind::Enum(values.as_slice()))
            .ok_or_else(|| invalid(keyword, "expected an array")),
        Keyword::Type => match value {
            Value::String(name) => Ok(SchemaKind::Type(name.parse()?)),
            Value::Array(names) => {
                let types = names
                    .iter()
                    .map(|name| {
                        name.as_str()
                            .ok_or_else(|| invalid(keyword, "expected type names"))?
                            .parse()
                    })
                    .collect::<Result<Vec<TypeName>, _>>()?;
                match types.as_slice() {
                    [] => Err(invalid(keyword, "empty type list")),
                    [single] => Ok(SchemaKind::Type(*single)),
                    _ => Ok(SchemaKind::TypeUnion(types)),
                }
            }
            _ => Err(invalid(keyword, "expected a string or an array of strings")),
        },
        Keyword::Format => value
            .as_str()
            .map(SchemaKind::Format)
            .ok_or_else(|| invalid(keyword, "expected a string")),
        Keyword::Properties => Ok(SchemaKind::Properties),
        Keyword::Items => Ok(SchemaKind::Items),
    }
}

fn subschemas(keyword: Keyword, value: &Value) -> Result<&[Value], SchemaError> {
    let subs = value
        .as_array()
        .ok_or_else(|| invalid(keyword, "expected an array of schemas"))?;
    if subs.is_empty() {
        return Err(SchemaError::EmptyCombinator(keyword.as_str()));
    }
    Ok(subs)
}

fn invalid(keyword: Keyword, reason: &str) -> SchemaError {
    SchemaError::InvalidKeyword {
        keyword: keyword.as_str(),
        reason: reason.to_string(),
    }
}
