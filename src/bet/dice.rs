//! Dice rolling with a pluggable entropy source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of independent uniform die rolls.
///
/// Implementations must draw uniformly from {1..6} and must not correlate
/// consecutive draws; each die of a bet is a separate call.
pub trait DiceRoller {
    /// Draw one die face uniformly from 1..=6.
    fn roll_die(&mut self) -> u8;
}

/// Roller backed by the thread-local OS-seeded generator.
///
/// Holds no generator state itself, so it stays Send and can cross await
/// points inside a spawned task.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngRoller;

impl DiceRoller for ThreadRngRoller {
    fn roll_die(&mut self) -> u8 {
        rand::thread_rng().gen_range(1..=6)
    }
}

/// Deterministic roller for reproducible roll sequences.
#[derive(Clone, Debug)]
pub struct SeededRoller {
    rng: StdRng,
}

impl SeededRoller {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DiceRoller for SeededRoller {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}
