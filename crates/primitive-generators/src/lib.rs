//! Primitive value generators for schema-fixtures.
//!
//! Each schema `type` (and each string `format`) has one constructor on
//! [`PrimitiveLibrary`]. Constructors read the node's [`Constraints`] and
//! return a boxed [`PrimitiveGenerator`] that produces `serde_json::Value`s
//! from a caller-supplied RNG.
//!
//! # Generators
//!
//! - `boolean` - Fair coin
//! - `integer` - Uniform integer in `[minimum, maximum]`, honoring `multipleOf`
//! - `number` - Uniform float in `[minimum, maximum)`
//! - `null` - Always `null`
//! - `string` - Alphanumeric string within `minLength` / `maxLength`
//! - `pattern` - String matching a regular expression
//! - `format` - Named formats (`date-time`, `date`, `time`, `email`, `uuid`,
//!   `uri`, `hostname`, `ipv4`, `ipv6`)
//!
//! Two helpers are not values of their own: [`IndexGenerator`] picks uniform
//! indices (enum members, combinator branches, store entries) and
//! [`ArrayGenerator`] decides list lengths and repeats an item generator.

pub mod array;
pub mod error;
pub mod format;
pub mod index;
pub mod numeric;
pub mod pattern;
pub mod scalar;
pub mod string;

use rand::RngCore;
use schema_core::Constraints;
use serde_json::Value;
use std::fmt;

// Re-exports for convenience
pub use array::ArrayGenerator;
pub use error::PrimitiveError;
pub use format::{Format, FormatGenerator};
pub use index::IndexGenerator;
pub use numeric::{IntegerGenerator, NumberGenerator};
pub use pattern::PatternGenerator;
pub use scalar::{BooleanGenerator, NullGenerator};
pub use string::StringGenerator;

/// A generator for one primitive value.
pub trait PrimitiveGenerator: Send + Sync + fmt::Debug {
    /// Produce a value using the given RNG.
    fn generate(&self, rng: &mut dyn RngCore) -> Value;

    /// Check a value against the constraints this generator enforces.
    ///
    /// `None` means the generator has no validator.
    fn validate(&self, _value: &Value) -> Option<bool> {
        None
    }
}

pub type BoxedPrimitive = Box<dyn PrimitiveGenerator>;

/// Constructors for every primitive the schema compiler needs.
///
/// [`StandardPrimitives`] is the default; a custom library can be plugged
/// into the registry to change how leaves are generated.
pub trait PrimitiveLibrary: Send + Sync + fmt::Debug {
    fn boolean(&self, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError>;
    fn integer(&self, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError>;
    fn number(&self, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError>;
    fn null(&self, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError>;
    fn string(&self, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError>;
    fn pattern(&self, pattern: &str, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError>;
    fn format(&self, format: &str, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError>;
    fn array(&self, constraints: &Constraints) -> Result<ArrayGenerator, PrimitiveError>;

    /// Uniform index picker over `[0, len)`.
    fn index(&self, len: usize) -> Result<IndexGenerator, PrimitiveError> {
        IndexGenerator::new(len)
    }
}

/// The built-in primitive library.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPrimitives;

impl PrimitiveLibrary for StandardPrimitives {
    fn boolean(&self, _constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError> {
        Ok(Box::new(BooleanGenerator))
    }

    fn integer(&self, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError> {
        Ok(Box::new(IntegerGenerator::from_constraints(constraints)?))
    }

    fn number(&self, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError> {
        Ok(Box::new(NumberGenerator::from_constraints(constraints)?))
    }

    fn null(&self, _constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError> {
        Ok(Box::new(NullGenerator))
    }

    fn string(&self, constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError> {
        Ok(Box::new(StringGenerator::from_constraints(constraints)?))
    }

    fn pattern(&self, pattern: &str, _constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError> {
        Ok(Box::new(PatternGenerator::new(pattern)?))
    }

    fn format(&self, format: &str, _constraints: &Constraints) -> Result<BoxedPrimitive, PrimitiveError> {
        Ok(Box::new(FormatGenerator::new(format.parse()?)))
    }

    fn array(&self, constraints: &Constraints) -> Result<ArrayGenerator, PrimitiveError> {
        ArrayGenerator::from_constraints(constraints)
    }
}
