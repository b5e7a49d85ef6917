use crate::engines::generation::operators::random_genome;
use crate::engines::generation::Genome;
use crate::engines::simulation::MEM_SIZE;
use crate::error::{Result, SimSnakeError};
use rand::Rng;

const WORD_BYTES: usize = std::mem::size_of::<i32>();

/// Binary genome format: native-endian `i32` words, no header, length implied
/// by the byte count
pub struct GenomeCodec;

impl GenomeCodec {
    pub fn encode(genome: &[i32]) -> Vec<u8> {
        genome.iter().flat_map(|word| word.to_ne_bytes()).collect()
    }

    pub fn decode(bytes: &[u8]) -> Result<Genome> {
        if bytes.len() % WORD_BYTES != 0 {
            return Err(SimSnakeError::GenomeFormat(format!(
                "{} bytes is not a whole number of {}-byte words",
                bytes.len(),
                WORD_BYTES
            )));
        }
        if bytes.len() / WORD_BYTES > MEM_SIZE {
            return Err(SimSnakeError::GenomeFormat(format!(
                "{} words exceeds memory size {}",
                bytes.len() / WORD_BYTES,
                MEM_SIZE
            )));
        }

        Ok(bytes
            .chunks_exact(WORD_BYTES)
            .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect())
    }

    /// Fresh export: the genome followed by random words up to `MEM_SIZE`
    pub fn export_padded<R: Rng>(genome: &[i32], rng: &mut R) -> Genome {
        let len = genome.len().min(MEM_SIZE);
        let mut padded = Vec::with_capacity(MEM_SIZE);
        padded.extend_from_slice(&genome[..len]);
        padded.extend(random_genome(MEM_SIZE - len, rng));
        padded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_encode_decode() {
        let genome = vec![0, 32, -1, i32::MIN, i32::MAX];
        let bytes = GenomeCodec::encode(&genome);
        assert_eq!(bytes.len(), 20);
        assert_eq!(GenomeCodec::decode(&bytes).unwrap(), genome);
    }

    #[test]
    fn test_decode_rejects_partial_word() {
        assert!(GenomeCodec::decode(&[1, 2, 3, 4, 5]).is_err());
    }

    #[test]
    fn test_decode_rejects_oversized_genome() {
        let bytes = vec![0u8; (MEM_SIZE + 1) * WORD_BYTES];
        assert!(GenomeCodec::decode(&bytes).is_err());
    }

    #[test]
    fn test_export_keeps_prefix() {
        let mut rng = StdRng::seed_from_u64(3);
        let padded = GenomeCodec::export_padded(&[29, 30, 31], &mut rng);
        assert_eq!(padded.len(), MEM_SIZE);
        assert_eq!(&padded[..3], &[29, 30, 31]);
    }
}
