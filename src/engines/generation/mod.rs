pub mod genome;
pub mod operators;
pub mod fitness;
pub mod progress;
pub mod population;

pub use genome::Genome;
pub use fitness::{LifeCounters, UNMEASURED};
pub use operators::CrossoverParams;
pub use population::{
    BestRecords, GenerationSummary, LifeProgress, LifeReport, PopulationController,
    PopulationSnapshot,
};
pub use progress::{ConsoleProgressCallback, JsonLinesProgressCallback, ProgressCallback};
