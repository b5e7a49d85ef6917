use super::traits::ConfigSection;
use crate::error::SimSnakeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub board_size: usize,
    /// Moves allowed since the last pellet before the snake starves
    pub max_hunger: u32,
    /// Instructions allowed without a movement before the life stalls
    pub stall_limit: u64,
    pub div_by_zero_is_fatal: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board_size: 32,
            max_hunger: 20,
            stall_limit: 10_000,
            div_by_zero_is_fatal: true,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), SimSnakeError> {
        if self.board_size < 2 || self.board_size > 256 {
            return Err(SimSnakeError::Configuration(
                "Board size must be between 2 and 256".to_string()
            ));
        }
        if self.max_hunger == 0 {
            return Err(SimSnakeError::Configuration(
                "Max hunger must be at least 1".to_string()
            ));
        }
        if self.stall_limit == 0 {
            return Err(SimSnakeError::Configuration(
                "Stall limit must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
