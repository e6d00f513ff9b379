// Seedable uniform stream for driving the scattering samplers.
//
// A PCG generator over a 64-bit LCG state. Every sampling call in the crate
// takes the stream explicitly, so one FastRng per worker is all a parallel
// host needs.

use rand::{RngCore, SeedableRng};

const PRN_MULT: u64 = 6364136223846793005;
const PRN_ADD: u64 = 1442695040888963407;
/// Multiplier for the RXS-M-XS output permutation
const PRN_PERMUTE: u64 = 12605985483714917081;
/// Number of draws between the starting points of neighbouring worker streams
const STREAM_STRIDE: u64 = 152917;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FastRng {
    state: u64,
}

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Stream for one worker of a parallel host.
    ///
    /// Worker `n` starts `n * STREAM_STRIDE` draws into the sequence seeded
    /// by `seed`, so workers sharing a base seed never replay each other's
    /// leading draws.
    pub fn for_worker(seed: u64, worker: u64) -> Self {
        let mut rng = Self::new(seed);
        rng.skip(worker.wrapping_mul(STREAM_STRIDE));
        rng
    }

    /// Uniform f64 in [0, 1).
    #[inline(always)]
    pub fn flat(&mut self) -> f64 {
        (self.next_u64() as f64) * 5.421010862427522e-20
    }

    /// Advance the stream by `n` draws in O(log n).
    pub fn skip(&mut self, n: u64) {
        // Brown's algorithm for jumping an LCG ahead
        let mut acc_mult: u64 = 1;
        let mut acc_add: u64 = 0;
        let mut cur_mult = PRN_MULT;
        let mut cur_add = PRN_ADD;
        let mut remaining = n;
        while remaining > 0 {
            if remaining & 1 == 1 {
                acc_mult = acc_mult.wrapping_mul(cur_mult);
                acc_add = acc_add.wrapping_mul(cur_mult).wrapping_add(cur_add);
            }
            cur_add = cur_mult.wrapping_add(1).wrapping_mul(cur_add);
            cur_mult = cur_mult.wrapping_mul(cur_mult);
            remaining >>= 1;
        }
        self.state = acc_mult.wrapping_mul(self.state).wrapping_add(acc_add);
    }

    pub fn reseed(&mut self, seed: u64) {
        self.state = seed;
    }
}

impl SeedableRng for FastRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }
}

impl RngCore for FastRng {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.state = PRN_MULT.wrapping_mul(self.state).wrapping_add(PRN_ADD);
        let word = ((self.state >> ((self.state >> 59) + 5)) ^ self.state).wrapping_mul(PRN_PERMUTE);
        (word >> 43) ^ word
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
