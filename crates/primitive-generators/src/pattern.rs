//! Regular-expression driven string generator.
//!
//! The pattern is parsed once into a `regex-syntax` HIR and each call walks
//! the tree, picking one branch of every alternation, one member of every
//! class and a repeat count for every repetition. Anchors and word
//! boundaries produce nothing.

use crate::error::PrimitiveError;
use crate::PrimitiveGenerator;
use rand::{Rng, RngCore};
use regex::Regex;
use regex_syntax::hir::{Class, Hir, HirKind};
use serde_json::Value;

/// Extra repetitions allowed for `*`, `+` and `{n,}`.
pub const MAX_EXTRA_REPEAT: u32 = 8;

/// Strings matching a regular expression.
#[derive(Debug, Clone)]
pub struct PatternGenerator {
    hir: Hir,
    regex: Regex,
}

impl PatternGenerator {
    pub fn new(pattern: &str) -> Result<Self, PrimitiveError> {
        let invalid = |reason: String| PrimitiveError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };
        let hir = regex_syntax::Parser::new()
            .parse(pattern)
            .map_err(|e| invalid(e.to_string()))?;
        let regex = Regex::new(pattern).map_err(|e| invalid(e.to_string()))?;
        Ok(Self { hir, regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl PrimitiveGenerator for PatternGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> Value {
        let mut out = String::new();
        emit(&self.hir, rng, &mut out);
        Value::String(out)
    }

    fn validate(&self, value: &Value) -> Option<bool> {
        Some(value.as_str().is_some_and(|s| self.regex.is_match(s)))
    }
}

fn emit(hir: &Hir, rng: &mut dyn RngCore, out: &mut String) {
    match hir.kind() {
        HirKind::Empty | HirKind::Look(_) => {}
        HirKind::Literal(literal) => out.push_str(&String::from_utf8_lossy(&literal.0)),
        HirKind::Class(Class::Unicode(class)) => {
            let total: u64 = class
                .ranges()
                .iter()
                .map(|r| u64::from(r.end() as u32 - r.start() as u32) + 1)
                .sum();
            if total == 0 {
                return;
            }
            let mut offset = rng.gen_range(0..total);
            for range in class.ranges() {
                let size = u64::from(range.end() as u32 - range.start() as u32) + 1;
                if offset < size {
                    let code = range.start() as u32 + offset as u32;
                    out.push(char::from_u32(code).unwrap_or(range.start()));
                    return;
                }
                offset -= size;
            }
        }
        HirKind::Class(Class::Bytes(class)) => {
            let total: u32 = class
                .ranges()
                .iter()
                .map(|r| u32::from(r.end() - r.start()) + 1)
                .sum();
            if total == 0 {
                return;
            }
            let mut offset = rng.gen_range(0..total);
            for range in class.ranges() {
                let size = u32::from(range.end() - range.start()) + 1;
                if offset < size {
                    // Non-ASCII bytes cannot stand alone in a String
                    let byte = range.start() + offset as u8;
                    out.push(if byte.is_ascii() { char::from(byte) } else { '?' });
                    return;
                }
                offset -= size;
            }
        }
        HirKind::Repetition(repetition) => {
            let min = repetition.min;
            let max = repetition
                .max
                .unwrap_or_else(|| min.saturating_add(MAX_EXTRA_REPEAT));
            let count = rng.gen_range(min..=max);
            for _ in 0..count {
                emit(&repetition.sub, rng, out);
            }
        }
        HirKind::Capture(capture) => emit(&capture.sub, rng, out),
        HirKind::Concat(parts) => {
            for part in parts {
                emit(part, rng, out);
            }
        }
        HirKind::Alternation(branches) => {
            let branch = rng.gen_range(0..branches.len());
            emit(&branches[branch], rng, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_matches(pattern: &str) {
        let mut rng = StdRng::seed_from_u64(42);
        let generator = PatternGenerator::new(pattern).unwrap();
        for _ in 0..50 {
            let value = generator.generate(&mut rng);
            assert_eq!(
                generator.validate(&value),
                Some(true),
                "{value} does not match {pattern}"
            );
        }
    }

    #[test]
    fn test_anchored_class_repetition() {
        assert_matches("^[a-z]{3,6}$");
    }

    #[test]
    fn test_alternation_and_groups() {
        assert_matches("^(cat|dog|bird)-[0-9]{2}$");
    }

    #[test]
    fn test_unbounded_repetition() {
        assert_matches("^ab+c*$");
    }

    #[test]
    fn test_escapes_and_perl_classes() {
        assert_matches(r"^\d{3}-\d{4}$");
        assert_matches(r"^\w+@example\.com$");
    }

    #[test]
    fn test_exact_literal() {
        let mut rng = StdRng::seed_from_u64(42);
        let generator = PatternGenerator::new("^hello$").unwrap();
        assert_eq!(generator.generate(&mut rng), Value::String("hello".into()));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternGenerator::new("([a-z]");
        assert!(matches!(result, Err(PrimitiveError::InvalidPattern { .. })));
    }
}
