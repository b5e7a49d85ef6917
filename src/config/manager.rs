use super::{
    evolution::EvolutionConfig,
    simulation::SimulationConfig,
    storage::StorageConfig,
    traits::ConfigSection,
};
use crate::error::SimSnakeError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables that override file values,
/// e.g. `SIMSNAKE__SIMULATION__BOARD_SIZE=16`
pub const ENV_PREFIX: &str = "SIMSNAKE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub evolution: EvolutionConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SimSnakeError> {
        self.simulation.check()?;
        self.evolution.check()?;
        self.storage.check()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Loads a TOML file, layering `SIMSNAKE__*` environment overrides on top
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SimSnakeError> {
        let source = config::File::from(path.as_ref())
            .format(config::FileFormat::Toml)
            .required(true);
        self.load_sources(Some(source))
    }

    /// Defaults plus environment overrides, for runs without a config file
    pub fn load_from_env(&mut self) -> Result<(), SimSnakeError> {
        self.load_sources(None)
    }

    fn load_sources(
        &mut self,
        file: Option<config::File<config::FileSourceFile, config::FileFormat>>,
    ) -> Result<(), SimSnakeError> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        let config: AppConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!("Loaded configuration: {:?}", config);

        self.config = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SimSnakeError> {
        let toml_str = toml::to_string_pretty(&self.config)
            .map_err(|e| SimSnakeError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| SimSnakeError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), SimSnakeError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
