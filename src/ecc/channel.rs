//! Noise sources for producing corrupted blocks.
//!
//! The decoder never draws random numbers itself; noise is applied by a
//! [`NoiseSource`] before decoding. [`BinarySymmetricChannel`] flips each bit
//! independently and takes an explicit seed so that runs can be reproduced.

use crate::ecc::block::Block;
use crate::ecc::NoiseSource;
use crate::error::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Flips every bit of a block independently with a fixed probability.
#[derive(Debug, Clone)]
pub struct BinarySymmetricChannel {
    /// Probability of flipping a single bit
    probability: f64,
    /// Random number generator driving the flips
    rng: ChaCha20Rng,
}

impl BinarySymmetricChannel {
    /// Creates a channel seeded from system entropy.
    pub fn new(probability: f64) -> Result<Self> {
        Self::validate(probability)?;
        Ok(Self {
            probability,
            rng: ChaCha20Rng::from_entropy(),
        })
    }

    /// Creates a reproducible channel from a seed.
    pub fn with_seed(probability: f64, seed: u64) -> Result<Self> {
        Self::validate(probability)?;
        Ok(Self {
            probability,
            rng: ChaCha20Rng::seed_from_u64(seed),
        })
    }

    /// Bit-flip probability
    pub fn probability(&self) -> f64 {
        self.probability
    }

    fn validate(probability: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::InvalidProbability(probability));
        }
        Ok(())
    }
}

impl NoiseSource for BinarySymmetricChannel {
    fn apply(&mut self, block: &mut Block) -> usize {
        let mut flipped = 0;
        for row in block.rows_mut() {
            for mut bit in row.iter_mut() {
                if self.rng.gen_bool(self.probability) {
                    let current = *bit;
                    *bit = !current;
                    flipped += 1;
                }
            }
        }
        flipped
    }
}
