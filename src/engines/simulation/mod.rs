pub mod isa;
pub mod memory;
pub mod board;
pub mod interpreter;

/// Words of unified code/data memory per genome (1 MiB of `i32`)
pub const MEM_SIZE: usize = 1_048_576 / 4;

pub use board::{Board, MoveOutcome};
pub use interpreter::{decode, Decoded, Interpreter, StepOutcome, VmState};
pub use isa::Opcode;
pub use memory::GenomeMemory;
