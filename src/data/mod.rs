pub mod codec;
pub mod store;
pub mod assembler;
pub mod seeding;

pub use assembler::{Assembler, Assembly};
pub use codec::GenomeCodec;
pub use seeding::seed_pool;
pub use store::{FileGenomeStore, GenomeStore, MemoryGenomeStore};
