//! Boolean and null generators.

use crate::PrimitiveGenerator;
use rand::{Rng, RngCore};
use serde_json::Value;

/// Fair coin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanGenerator;

impl PrimitiveGenerator for BooleanGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        Value::Bool(rng.gen_bool(0.5))
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        Some(value.is_boolean())
    }
}

/// Always `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGenerator;

impl PrimitiveGenerator for NullGenerator {
    fn generate(&self, _rng: &mut dyn RngCore) -> Value {
        Value::Null
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        Some(value.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_boolean_produces_both_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let values: Vec<Value> = (0..64).map(|_| BooleanGenerator.generate(&mut rng)).collect();
        assert!(values.contains(&Value::Bool(true)));
        assert!(values.contains(&Value::Bool(false)));
    }

    #[test]
    fn test_null() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(NullGenerator.generate(&mut rng), Value::Null);
        assert_eq!(NullGenerator.validate(&Value::Bool(false)), Some(false));
    }
}
