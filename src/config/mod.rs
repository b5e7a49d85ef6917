pub mod traits;
pub mod simulation;
pub mod evolution;
pub mod storage;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use simulation::SimulationConfig;
pub use evolution::EvolutionConfig;
pub use storage::StorageConfig;
pub use traits::ConfigSection;
