/// Genome representation for the snake VM
///
/// A genome is a flat sequence of `i32` words loaded verbatim into the
/// interpreter's memory. Every word is both data and code: it acts as an
/// opcode only when the instruction pointer lands on it, so a program can read
/// and rewrite its own instructions.
///
/// # Why a flat word array?
///
/// - **Crossover**: swapping fixed-size memory segments is plain slice copying
/// - **Mutation**: overwriting single words is trivial
/// - **No invalid states**: every word decodes (unknown values are `Nop`)
///
/// The logical length is at most `MEM_SIZE`; shorter genomes are zero-padded
/// when loaded into a VM.
///
/// # Example
///
/// ```
/// use simsnake::engines::simulation::Opcode;
///
/// // Walk right until the wall
/// let genome = vec![Opcode::GoRight.as_i32(), Opcode::Jmp.as_i32(), -1];
/// assert_eq!(genome.len(), 3);
/// ```
pub type Genome = Vec<i32>;
