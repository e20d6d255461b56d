use rand::{Rng, random};

const MULTIPLIER_A: i64 = 1103515245;
const INCREMENT_C: i64 = 12345;
const DEFAULT_SEED: i64 = 3819201;

/// Source of randomness used to generate positions.
pub trait RandomGenerator: Default {
    fn next(&mut self) -> i32;
    fn next_range(&mut self, from: i32, to: i32) -> i32;

    /// Picks an element uniformly, or `None` for an empty slice.
    fn get_random_from_vec<'a, K>(&mut self, vec: &'a [K]) -> Option<&'a K> {
        if vec.is_empty() {
            return None;
        }
        vec.get(self.next_range(0, vec.len() as i32) as usize)
    }
}

/// Backed by the thread-local generator from `rand`.
#[derive(Debug, Default)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next(&mut self) -> i32 {
        random()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        rand::rng().random_range(from..to)
    }
}

/// A seeded linear congruential generator; the same seed always yields the same sequence.
#[derive(Debug)]
pub struct CustomNumberGenerator {
    seed: i64,
}

impl Default for CustomNumberGenerator {
    fn default() -> Self {
        CustomNumberGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for CustomNumberGenerator {
    fn next(&mut self) -> i32 {
        self.seed = (self.seed * MULTIPLIER_A + INCREMENT_C) % (i32::MAX as i64);
        self.seed as i32
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        (self.next() % (to - from)).abs() + from
    }
}

impl CustomNumberGenerator {
    pub const fn new(seed: i64) -> Self {
        Self { seed }
    }
}
