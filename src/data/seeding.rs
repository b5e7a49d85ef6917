use super::assembler::Assembler;
use super::codec::GenomeCodec;
use super::store::GenomeStore;
use crate::config::StorageConfig;
use crate::error::Result;
use rand::Rng;

/// Fills every pool slot that has no stored genome by assembling the seed
/// scripts round-robin. Existing genomes are never overwritten.
///
/// Returns the number of slots written.
pub fn seed_pool<S: GenomeStore, R: Rng>(
    store: &mut S,
    storage: &StorageConfig,
    pool_size: usize,
    rng: &mut R,
) -> Result<usize> {
    if storage.seed_scripts.is_empty() {
        return Ok(0);
    }

    let mut seeded = 0;
    for index in 0..pool_size {
        let name = storage.slot_name(index);
        if store.contains(&name) {
            continue;
        }

        let script = &storage.seed_scripts[index % storage.seed_scripts.len()];
        let assembly = match Assembler::load_file(script) {
            Ok(assembly) => assembly,
            Err(e) => {
                log::warn!("Unable to load script \"{}\": {}", script.display(), e);
                continue;
            }
        };

        let genome = GenomeCodec::export_padded(&assembly.genome, rng);
        store.put(&name, &genome)?;
        log::debug!("Seeded {} from {}", name, script.display());
        seeded += 1;
    }

    Ok(seeded)
}
