//! Numeric value generators.

use crate::error::PrimitiveError;
use crate::PrimitiveGenerator;
use rand::{Rng, RngCore};
use schema_core::{Bound, Constraints};
use serde_json::Value;

/// Width of the generated range when only one side is bounded (or neither).
pub const DEFAULT_SPAN: i64 = 1000;

/// 2^63, the first float past `i64::MAX`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Uniform integers in an inclusive range, optionally restricted to
/// multiples of a step.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerGenerator {
    min: i64,
    max: i64,
    step: Option<i64>,
}

impl IntegerGenerator {
    /// Create a generator over `[min, max]`.
    pub fn new(min: i64, max: i64) -> Result<Self, PrimitiveError> {
        if min > max {
            return Err(PrimitiveError::range(
                "integer",
                format!("minimum {min} is greater than maximum {max}"),
            ));
        }
        Ok(Self {
            min,
            max,
            step: None,
        })
    }

    pub fn from_constraints(constraints: &Constraints) -> Result<Self, PrimitiveError> {
        let lower = constraints.lower().map(integer_floor_bound).transpose()?;
        let upper = constraints.upper().map(integer_ceiling_bound).transpose()?;

        let (min, max) = match (lower, upper) {
            (Some(min), Some(max)) => (min, max),
            (Some(min), None) => (min, min.saturating_add(DEFAULT_SPAN)),
            (None, Some(max)) if max >= 0 => (0, max),
            (None, Some(max)) => (max.saturating_sub(DEFAULT_SPAN), max),
            (None, None) => (0, DEFAULT_SPAN),
        };

        let mut generator = Self::new(min, max)?;

        // Fractional steps divide every integer.
        if let Some(step) = constraints.multiple_of {
            if step >= 1.0 && step.fract() == 0.0 {
                let step = step as i64;
                if ceil_div(min, step) > max.div_euclid(step) {
                    return Err(PrimitiveError::range(
                        "integer",
                        format!("no multiple of {step} in [{min}, {max}]"),
                    ));
                }
                generator.step = Some(step);
            }
        }

        Ok(generator)
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
            && self.step.map_or(true, |step| value.rem_euclid(step) == 0)
    }
}

impl PrimitiveGenerator for IntegerGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let value = match self.step {
            Some(step) => {
                let k = rng.gen_range(ceil_div(self.min, step)..=self.max.div_euclid(step));
                k * step
            }
            None => rng.gen_range(self.min..=self.max),
        };
        Value::from(value)
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        let integral = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            _ => None,
        };
        Some(integral.is_some_and(|i| self.contains(i)))
    }
}

/// Uniform floats in `[low, high)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberGenerator {
    low: f64,
    high: f64,
    low_exclusive: bool,
    high_exclusive: bool,
}

impl NumberGenerator {
    pub fn from_constraints(constraints: &Constraints) -> Result<Self, PrimitiveError> {
        let span = DEFAULT_SPAN as f64;
        let (low, high) = match (constraints.lower(), constraints.upper()) {
            (Some(low), Some(high)) => (low, high),
            (Some(low), None) => (low, inclusive(low.value + span)),
            (None, Some(high)) if high.value > 0.0 => (inclusive(0.0), high),
            (None, Some(high)) => (inclusive(high.value - span), high),
            (None, None) => (inclusive(0.0), inclusive(span)),
        };

        let empty = low.value > high.value
            || (low.value == high.value && (low.exclusive || high.exclusive))
            || !low.value.is_finite()
            || !high.value.is_finite();
        if empty {
            return Err(PrimitiveError::range(
                "number",
                format!("no value between {} and {}", low.value, high.value),
            ));
        }

        Ok(Self {
            low: low.value,
            high: high.value,
            low_exclusive: low.exclusive,
            high_exclusive: high.exclusive,
        })
    }
}

impl PrimitiveGenerator for NumberGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        if self.low == self.high {
            return Value::from(self.low);
        }
        let mut value = if (self.high - self.low).is_finite() {
            rng.gen_range(self.low..self.high)
        } else {
            // Span overflows f64; interpolate between the bounds instead
            let t: f64 = rng.gen();
            self.low * (1.0 - t) + self.high * t
        };
        let outside = (self.low_exclusive && value <= self.low) || value >= self.high;
        if outside {
            value = self.low / 2.0 + self.high / 2.0;
        }
        Value::from(value)
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        let Some(n) = value.as_f64() else {
            return Some(false);
        };
        let above = if self.low_exclusive { n > self.low } else { n >= self.low };
        let below = if self.high_exclusive { n < self.high } else { n <= self.high };
        Some(above && below)
    }
}

fn inclusive(value: f64) -> Bound {
    Bound {
        value,
        exclusive: false,
    }
}

/// Smallest integer allowed by a lower bound.
///
/// Bounds below `i64::MIN` clamp; bounds past `i64::MAX` leave nothing.
fn integer_floor_bound(bound: Bound) -> Result<i64, PrimitiveError> {
    let lowest = if bound.exclusive {
        bound.value.floor() + 1.0
    } else {
        bound.value.ceil()
    };
    if lowest >= I64_LIMIT {
        return Err(PrimitiveError::range(
            "integer",
            format!("lower bound {} is beyond the 64-bit integer range", bound.value),
        ));
    }
    Ok(lowest.max(-I64_LIMIT) as i64)
}

/// Largest integer allowed by an upper bound.
///
/// Bounds past `i64::MAX` clamp; bounds below `i64::MIN` leave nothing.
fn integer_ceiling_bound(bound: Bound) -> Result<i64, PrimitiveError> {
    let highest = if bound.exclusive {
        bound.value.ceil() - 1.0
    } else {
        bound.value.floor()
    };
    if highest < -I64_LIMIT {
        return Err(PrimitiveError::range(
            "integer",
            format!("upper bound {} is beyond the 64-bit integer range", bound.value),
        ));
    }
    Ok(if highest >= I64_LIMIT { i64::MAX } else { highest as i64 })
}

fn ceil_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b) + i64::from(a.rem_euclid(b) != 0)
}
