//! The random source the generators draw from.
//!
//! Every [`rand::Rng`] is a [`RandomSource`], so a seeded
//! [`ChaCha8Rng`](rand_chacha::ChaCha8Rng) gives reproducible output. Tests
//! substitute scripted sources to drive out-of-contract paths.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Placeholder replaced by a random digit in [`RandomSource::fill_pattern`].
pub const DIGIT_PLACEHOLDER: char = '#';

/// Supplies random integers, option picks, and digit patterns.
pub trait RandomSource {
    /// Returns a uniformly random integer in `min..=max`.
    ///
    /// Implementations may assume `min <= max`.
    fn uniform_int(&mut self, min: i64, max: i64) -> i64;

    /// Picks one of `options` uniformly, or `None` when `options` is empty.
    fn pick_one<'a>(&mut self, options: &[&'a str]) -> Option<&'a str>;

    /// Replaces every [`DIGIT_PLACEHOLDER`] in `pattern` with a random ASCII
    /// digit and copies all other characters.
    fn fill_pattern(&mut self, pattern: &str) -> String;
}

impl<R: Rng> RandomSource for R {
    fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        self.random_range(min..=max)
    }

    fn pick_one<'a>(&mut self, options: &[&'a str]) -> Option<&'a str> {
        options.choose(self).copied()
    }

    fn fill_pattern(&mut self, pattern: &str) -> String {
        pattern
            .chars()
            .map(|c| {
                if c == DIGIT_PLACEHOLDER {
                    char::from(b'0' + self.random_range(0..=9_u8))
                } else {
                    c
                }
            })
            .collect()
    }
}
