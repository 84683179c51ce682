use rand::{rngs::StdRng, Rng, SeedableRng};
use std::str::FromStr;

use crate::task::TaskId;

/// Upper bound (exclusive) of randomly drawn task ids.
pub const ID_RANGE: TaskId = 1000;

/// Source of ids for newly added tasks.
pub trait IdGenerator {
    fn next_id(&mut self) -> TaskId;
}

/// Uniform draw from `[0, ID_RANGE)`. Does not check for collisions with ids
/// already in the task list.
#[derive(Debug, Clone)]
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> TaskId {
        self.rng.gen_range(0..ID_RANGE)
    }
}

/// Monotonic ids, never repeating within a session.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: TaskId,
}

impl SequentialIds {
    pub fn starting_at(next: TaskId) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TaskId {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    #[default]
    Random,
    Sequential,
}

impl IdStrategy {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            IdStrategy::Random => Box::new(RandomIds::new()),
            // Seed tasks commonly use small ids, start past the random range.
            IdStrategy::Sequential => Box::new(SequentialIds::starting_at(ID_RANGE)),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(IdStrategy::Random),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(format!("unknown id strategy '{}'", other)),
        }
    }
}
