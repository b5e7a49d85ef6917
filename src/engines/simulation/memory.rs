use super::MEM_SIZE;

/// Fixed-size unified code/data memory of one VM.
///
/// Addresses are the VM's signed register values; anything outside
/// `[0, MEM_SIZE)` is rejected instead of indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomeMemory {
    words: Box<[i32]>,
}

impl GenomeMemory {
    pub fn zeroed() -> Self {
        Self {
            words: vec![0; MEM_SIZE].into_boxed_slice(),
        }
    }

    /// Copies the genome in, zero-padding short genomes and truncating long ones
    pub fn from_genome(genome: &[i32]) -> Self {
        let mut memory = Self::zeroed();
        if genome.len() > MEM_SIZE {
            log::warn!(
                "Genome of {} words exceeds memory size {}, truncating",
                genome.len(),
                MEM_SIZE
            );
        }
        let len = genome.len().min(MEM_SIZE);
        memory.words[..len].copy_from_slice(&genome[..len]);
        memory
    }

    fn index(address: i32) -> Option<usize> {
        usize::try_from(address).ok().filter(|&i| i < MEM_SIZE)
    }

    pub fn get(&self, address: i32) -> Option<i32> {
        Self::index(address).map(|i| self.words[i])
    }

    /// Reads an immediate operand; words past the end read as zero
    pub fn get_or_zero(&self, address: i32) -> i32 {
        self.get(address).unwrap_or(0)
    }

    /// Returns `false` when the address is outside memory
    pub fn set(&mut self, address: i32, value: i32) -> bool {
        match Self::index(address) {
            Some(i) => {
                self.words[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn contains(address: i32) -> bool {
        Self::index(address).is_some()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.words
    }
}
