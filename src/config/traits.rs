use crate::error::SimSnakeError;
use serde::{de::DeserializeOwned, Serialize};

/// One `[section]` of the TOML config file
pub trait ConfigSection: Serialize + DeserializeOwned + Default + Clone {
    fn section_name() -> &'static str;

    fn validate(&self) -> Result<(), SimSnakeError>;

    /// `validate`, with the failing section named in the message
    fn check(&self) -> Result<(), SimSnakeError> {
        self.validate().map_err(|e| match e {
            SimSnakeError::Configuration(msg) => {
                SimSnakeError::Configuration(format!("[{}] {}", Self::section_name(), msg))
            }
            other => other,
        })
    }
}
