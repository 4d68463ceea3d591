/*
 * Infrastructure: Random Source adapters
 *
 * - SeededRandom: reproducible stream backed by `rand`'s StdRng
 * - CannedRandom: replays a fixed sequence (tests, replaying a recorded run)
 * - ZeroRandom: always picks the first candidate
 */

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shared::ports::RandomSource;

/// Seeded random source; the same seed yields the same sequence
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_int(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "next_int bound must be non-zero");
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of choices
///
/// # Panics
/// When the sequence is exhausted or a value is out of the requested bound.
#[derive(Debug, Clone, Default)]
pub struct CannedRandom {
    values: VecDeque<usize>,
}

impl CannedRandom {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Choices not consumed yet
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for CannedRandom {
    fn next_int(&mut self, bound: usize) -> usize {
        let Some(value) = self.values.pop_front() else {
            panic!("canned random sequence exhausted (bound {bound})");
        };
        assert!(
            value < bound,
            "canned value {value} out of bound {bound}"
        );
        value
    }
}

/// Always answers 0
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroRandom;

impl RandomSource for ZeroRandom {
    fn next_int(&mut self, _bound: usize) -> usize {
        0
    }
}
