//! List-array generator.
//!
//! The array generator owns the length policy (`minItems` / `maxItems`) and
//! calls back into an item generator once per element. Items can be anything
//! the caller produces, including deferred values, so the item type and its
//! error are generic.

use crate::error::PrimitiveError;
use rand::{Rng, RngCore};
use schema_core::Constraints;

/// Upper length used when `maxItems` is absent.
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Decides list lengths and repeats an item generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayGenerator {
    min_items: usize,
    max_items: usize,
}

impl ArrayGenerator {
    pub fn new(min_items: usize, max_items: usize) -> Result<Self, PrimitiveError> {
        if min_items > max_items {
            return Err(PrimitiveError::range(
                "array",
                format!("minItems {min_items} is greater than maxItems {max_items}"),
            ));
        }
        Ok(Self {
            min_items,
            max_items,
        })
    }

    pub fn from_constraints(constraints: &Constraints) -> Result<Self, PrimitiveError> {
        let min_items = constraints.min_items.unwrap_or(0);
        let max_items = constraints
            .max_items
            .unwrap_or(min_items.max(DEFAULT_MAX_ITEMS));
        Self::new(min_items, max_items)
    }

    pub fn length(&self, rng: &mut dyn RngCore) -> usize {
        rng.gen_range(self.min_items..=self.max_items)
    }

    /// Pick a length, then call `item` that many times.
    pub fn fill_with<T, E, F>(&self, rng: &mut dyn RngCore, mut item: F) -> Result<Vec<T>, E>
    where
        F: FnMut(&mut dyn RngCore) -> Result<T, E>,
    {
        let length = self.length(rng);
        let mut items = Vec::with_capacity(length);
        for _ in 0..length {
            items.push(item(&mut *rng)?);
        }
        Ok(items)
    }

    pub fn validate_length(&self, length: usize) -> bool {
        (self.min_items..=self.max_items).contains(&length)
    }
}
