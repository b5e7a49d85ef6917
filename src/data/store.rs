use super::codec::GenomeCodec;
use crate::engines::generation::Genome;
use crate::error::{Result, SimSnakeError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Named genome persistence used by the population controller
pub trait GenomeStore {
    /// Missing or unreadable genomes come back as `None`; callers substitute a fallback
    fn get(&self, name: &str) -> Option<Genome>;

    fn put(&mut self, name: &str, genome: &[i32]) -> Result<()>;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// One binary file per genome inside a directory
pub struct FileGenomeStore {
    dir: PathBuf,
}

impl FileGenomeStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return None;
        }
        Some(self.dir.join(name))
    }
}

impl GenomeStore for FileGenomeStore {
    fn get(&self, name: &str) -> Option<Genome> {
        let path = self.path_for(name)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Unable to read genome \"{}\": {}", path.display(), e);
                return None;
            }
        };

        match GenomeCodec::decode(&bytes) {
            Ok(genome) => Some(genome),
            Err(e) => {
                log::warn!("Rejected genome \"{}\": {}", path.display(), e);
                None
            }
        }
    }

    fn put(&mut self, name: &str, genome: &[i32]) -> Result<()> {
        let path = self
            .path_for(name)
            .ok_or_else(|| SimSnakeError::Storage(format!("Invalid genome name: {:?}", name)))?;
        std::fs::write(&path, GenomeCodec::encode(genome))?;
        Ok(())
    }

    fn contains(&self, name: &str) -> bool {
        self.path_for(name).is_some_and(|path| path.is_file())
    }
}

/// In-memory store, for tests and throwaway runs
#[derive(Debug, Default, Clone)]
pub struct MemoryGenomeStore {
    genomes: HashMap<String, Genome>,
}

impl MemoryGenomeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }
}

impl GenomeStore for MemoryGenomeStore {
    fn get(&self, name: &str) -> Option<Genome> {
        self.genomes.get(name).cloned()
    }

    fn put(&mut self, name: &str, genome: &[i32]) -> Result<()> {
        self.genomes.insert(name.to_string(), genome.to_vec());
        Ok(())
    }

    fn contains(&self, name: &str) -> bool {
        self.genomes.contains_key(name)
    }
}
