use serde::{Deserialize, Serialize};

/// Fitness of a slot whose genome has not lived yet this generation (worst)
pub const UNMEASURED: i64 = i64::MAX;

/// Counters captured when a life ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeCounters {
    pub instructions: u64,
    pub movements: u64,
    pub pellets_eaten: u32,
}

impl LifeCounters {
    /// `instructions / 1000 + movements - 100 * pellets`, lower is better
    pub fn fitness(&self) -> i64 {
        let instructions = (self.instructions / 1000) as i64;
        let movements = self.movements as i64;
        let pellets = self.pellets_eaten as i64;
        instructions + movements - 100 * pellets
    }
}
