//! Uniform index picker.

use crate::error::PrimitiveError;
use rand::{Rng, RngCore};

/// Picks indices uniformly from `[0, len)`; `len` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexGenerator {
    len: usize,
}

impl IndexGenerator {
    pub fn new(len: usize) -> Result<Self, PrimitiveError> {
        if len == 0 {
            return Err(PrimitiveError::range("index", "nothing to pick from"));
        }
        Ok(Self { len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn pick(&self, rng: &mut dyn RngCore) -> usize {
        rng.gen_range(0..self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_covers_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let index = IndexGenerator::new(4).unwrap();
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[index.pick(&mut rng)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_zero_len_rejected() {
        assert!(matches!(IndexGenerator::new(0), Err(PrimitiveError::InvalidRange { .. })));
    }
}
