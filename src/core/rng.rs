//! Random draw helpers shared by every subsystem.
//!
//! All randomness flows through `rand::Rng` and is consumed as uniform
//! draws in `[0, 1)`. `ScriptedRng` replays a fixed list of draws so that
//! tests can force crits, dodges and table picks.

use rand::{Error, Rng, RngCore};

/// Uniform draw in `[0, 1)`.
pub fn roll(rng: &mut impl Rng) -> f64 {
    rng.gen::<f64>()
}

/// True with probability `p`.
pub fn chance(rng: &mut impl Rng, p: f64) -> bool {
    roll(rng) < p
}

/// Uniform index into a collection of `len` elements. `len` must be > 0.
pub fn pick_index(rng: &mut impl Rng, len: usize) -> usize {
    ((roll(rng) * len as f64) as usize).min(len.saturating_sub(1))
}

/// `base + floor(u * spread)`, the shape used for all randomized amounts.
pub fn roll_amount(rng: &mut impl Rng, base: u32, spread: u32) -> u32 {
    base + (roll(rng) * spread as f64) as u32
}

/// Proportional selection over `weights`.
///
/// Draws `r = u * total` and returns the first index whose cumulative
/// weight exceeds `r`. Returns `None` when the total weight is zero so the
/// caller can substitute its designated default.
pub fn pick_weighted(rng: &mut impl Rng, weights: &[u32]) -> Option<usize> {
    let total: u64 = weights.iter().map(|&w| w as u64).sum();
    if total == 0 {
        return None;
    }
    let r = roll(rng) * total as f64;
    let mut acc = 0.0;
    for (idx, &w) in weights.iter().enumerate() {
        acc += w as f64;
        if r < acc {
            return Some(idx);
        }
    }
    None
}

/// Deterministic `RngCore` that replays scripted `[0, 1)` draws in a loop.
///
/// Each scripted value `v` is encoded so that `rng.gen::<f64>()` returns
/// exactly `v` (for values representable in 53 bits). Values at or above
/// 1.0 are clamped to the largest draw below 1.0, which makes them useful
/// for forcing "never succeeds" rolls.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// A source that always returns the same draw.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// How many draws have been consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_draw(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}

const F64_MANTISSA_SCALE: f64 = (1u64 << 53) as f64;

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let v = self.next_draw().clamp(0.0, 1.0);
        let bits = ((v * F64_MANTISSA_SCALE) as u64).min((1u64 << 53) - 1);
        bits << 11
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scripted_rng_replays_draws() {
        let mut rng = ScriptedRng::new(vec![0.25, 0.5, 0.75]);
        assert_eq!(roll(&mut rng), 0.25);
        assert_eq!(roll(&mut rng), 0.5);
        assert_eq!(roll(&mut rng), 0.75);
        assert_eq!(roll(&mut rng), 0.25);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn test_scripted_rng_clamps_one() {
        let mut rng = ScriptedRng::constant(1.0);
        let v = roll(&mut rng);
        assert!(v < 1.0);
        assert!(v > 0.999_999);
    }

    #[test]
    fn test_pick_weighted_brackets() {
        let weights = [1, 2, 1];
        let mut rng = ScriptedRng::new(vec![0.0, 0.3, 0.74, 0.75, 0.99]);
        assert_eq!(pick_weighted(&mut rng, &weights), Some(0));
        assert_eq!(pick_weighted(&mut rng, &weights), Some(1));
        assert_eq!(pick_weighted(&mut rng, &weights), Some(1));
        assert_eq!(pick_weighted(&mut rng, &weights), Some(2));
        assert_eq!(pick_weighted(&mut rng, &weights), Some(2));
    }

    #[test]
    fn test_pick_weighted_zero_total() {
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(pick_weighted(&mut rng, &[0, 0, 0]), None);
        assert_eq!(pick_weighted(&mut rng, &[]), None);
    }

    #[test]
    fn test_pick_weighted_skips_zero_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_ne!(pick_weighted(&mut rng, &[5, 0, 5]), Some(1));
        }
    }

    #[test]
    fn test_pick_index_bounds() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.999]);
        assert_eq!(pick_index(&mut rng, 3), 0);
        assert_eq!(pick_index(&mut rng, 3), 2);
    }

    #[test]
    fn test_roll_amount() {
        let mut rng = ScriptedRng::constant(0.5);
        assert_eq!(roll_amount(&mut rng, 30, 50), 55);
    }
}
