use super::traits::ConfigSection;
use crate::error::SimSnakeError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub genome_dir: PathBuf,
    /// Slot `i` is stored under `name_prefix` followed by `i`
    pub name_prefix: String,
    /// Assembly scripts used to fill slots that have no stored genome yet
    pub seed_scripts: Vec<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            genome_dir: PathBuf::from("genomes"),
            name_prefix: "Gene".to_string(),
            seed_scripts: vec![
                PathBuf::from("scripts/scan_fill.asm"),
                PathBuf::from("scripts/go_right.asm"),
                PathBuf::from("scripts/left_right_cycle.asm"),
                PathBuf::from("scripts/edge_walk.asm"),
            ],
        }
    }
}

impl StorageConfig {
    pub fn slot_name(&self, index: usize) -> String {
        format!("{}{}", self.name_prefix, index)
    }
}

impl ConfigSection for StorageConfig {
    fn section_name() -> &'static str {
        "storage"
    }

    fn validate(&self) -> Result<(), SimSnakeError> {
        if self.name_prefix.is_empty() {
            return Err(SimSnakeError::Configuration(
                "Genome name prefix must not be empty".to_string()
            ));
        }
        if self.name_prefix.contains(['/', '\\']) {
            return Err(SimSnakeError::Configuration(
                "Genome name prefix must not contain path separators".to_string()
            ));
        }
        Ok(())
    }
}
