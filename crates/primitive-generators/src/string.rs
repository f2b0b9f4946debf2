//! Plain string generator.

use crate::error::PrimitiveError;
use crate::PrimitiveGenerator;
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};
use schema_core::Constraints;
use serde_json::Value;

/// Upper length used when `maxLength` is absent.
pub const DEFAULT_MAX_LENGTH: usize = 16;

/// Alphanumeric strings with a length in `[min_length, max_length]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StringGenerator {
    min_length: usize,
    max_length: usize,
}

impl StringGenerator {
    pub fn from_constraints(constraints: &Constraints) -> Result<Self, PrimitiveError> {
        let min_length = match (constraints.min_length, constraints.max_length) {
            (Some(min), _) => min,
            (None, Some(max)) => max.min(1),
            (None, None) => 1,
        };
        let max_length = constraints
            .max_length
            .unwrap_or(min_length.max(DEFAULT_MAX_LENGTH));

        if min_length > max_length {
            return Err(PrimitiveError::range(
                "string",
                format!("minLength {min_length} is greater than maxLength {max_length}"),
            ));
        }

        Ok(Self {
            min_length,
            max_length,
        })
    }
}

impl PrimitiveGenerator for StringGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let length = rng.gen_range(self.min_length..=self.max_length);
        let mut result = String::with_capacity(length);
        for _ in 0..length {
            result.push(char::from(rng.sample(Alphanumeric)));
        }
        Value::String(result)
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        Some(value.as_str().is_some_and(|s| {
            (self.min_length..=self.max_length).contains(&s.chars().count())
        }))
    }
}
