// crates/pm_core/src/rng.rs
//
// Deterministic RNG for the simulation draws (floor vote, vote-share
// randomization, party colors). The seed is the only source of randomness;
// no OS entropy. Unbiased integer ranges via rejection sampling.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Seeded simulation RNG.
///
/// Internally ChaCha20 with an explicit 32-byte seed derived from the 64-bit
/// seed (little-endian bytes in the first 8 positions; the rest 0), so the
/// stream is stable across platforms.
#[derive(Debug, Clone)]
pub struct SimRng {
    rng: ChaCha20Rng,
    words_consumed: u128,
}

/// Create a simulation RNG from an integer seed.
pub fn sim_rng_from_seed(seed: u64) -> SimRng {
    SimRng::from_seed_u64(seed)
}

impl SimRng {
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            rng: ChaCha20Rng::from_seed(seed32),
            words_consumed: 0,
        }
    }

    /// Number of 64-bit words drawn so far (saturating).
    #[inline]
    pub fn words_consumed(&self) -> u128 {
        self.words_consumed
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.words_consumed = self.words_consumed.saturating_add(1);
        self.rng.next_u64()
    }

    /// Unbiased integer in [0, n); `None` if `n == 0`.
    ///
    /// Accept `x` if `x >= 2^64 mod n`; then `x % n` is uniform.
    #[inline]
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return Some(x % n);
            }
        }
    }

    /// Uniform f64 in [0, 1) from the top 53 bits of one word.
    #[inline]
    pub fn next_unit_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Deterministic in-place Fisher–Yates shuffle.
    pub fn shuffle_in_place<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        if len <= 1 {
            return;
        }
        for i in (1..len).rev() {
            let j = match self.gen_range((i as u64) + 1) {
                Some(v) => v as usize,
                None => unreachable!("gen_range(>0) must return Some"),
            };
            slice.swap(i, j);
        }
    }
}

impl Default for SimRng {
    fn default() -> Self {
        sim_rng_from_seed(0)
    }
}
