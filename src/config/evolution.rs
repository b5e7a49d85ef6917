use super::traits::ConfigSection;
use crate::engines::simulation::MEM_SIZE;
use crate::error::SimSnakeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub pool_size: usize,
    /// Number of equal segments genome memory is split into for crossover
    pub segment_count: usize,
    pub max_chunk_swaps: usize,
    /// Fraction of memory words overwritten by point mutation
    pub mutation_rate: f64,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            pool_size: 64,
            segment_count: 128,
            max_chunk_swaps: 5,
            mutation_rate: 0.0001,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), SimSnakeError> {
        if self.pool_size < 2 || self.pool_size % 2 != 0 {
            return Err(SimSnakeError::Configuration(
                "Pool size must be an even number of at least 2".to_string()
            ));
        }
        if self.segment_count == 0 || MEM_SIZE % self.segment_count != 0 {
            return Err(SimSnakeError::Configuration(format!(
                "Segment count must divide the memory size ({})",
                MEM_SIZE
            )));
        }
        if self.max_chunk_swaps == 0 {
            return Err(SimSnakeError::Configuration(
                "Max chunk swaps must be at least 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SimSnakeError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        Ok(())
    }
}
