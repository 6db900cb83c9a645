//! Seedable pseudo-random source shared by all effect routines

use rand::{RngCore, SeedableRng, rngs::SmallRng};

/// Deterministic pseudo-random generator
///
/// Seeded once from host entropy. Two generators with the same seed
/// produce the same sequence, so animations are reproducible.
#[derive(Debug, Clone)]
pub struct Prng {
    rng: SmallRng,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Restart the sequence from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn random8(&mut self) -> u8 {
        (self.rng.next_u32() >> 24) as u8
    }

    /// Random value in `0..limit` (0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation)]
    pub fn random8_below(&mut self, limit: u8) -> u8 {
        ((u16::from(self.random8()) * u16::from(limit)) >> 8) as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn random16(&mut self) -> u16 {
        (self.rng.next_u32() >> 16) as u16
    }

    /// Random value in `0..limit` (0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation)]
    pub fn random16_below(&mut self, limit: u16) -> u16 {
        ((u32::from(self.random16()) * u32::from(limit)) >> 16) as u16
    }

    /// Random value in `min..max` (`min` when the range is empty)
    pub fn random16_between(&mut self, min: u16, max: u16) -> u16 {
        if max <= min {
            return min;
        }
        min + self.random16_below(max - min)
    }
}
