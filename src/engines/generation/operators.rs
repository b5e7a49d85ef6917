use crate::engines::generation::genome::Genome;
use crate::engines::simulation::MEM_SIZE;
use rand::Rng;

/// Crossover/mutation parameters, taken from the evolution config
#[derive(Debug, Clone, Copy)]
pub struct CrossoverParams {
    pub segment_count: usize,
    pub max_chunk_swaps: usize,
    pub mutation_rate: f64,
}

/// Zero-pad (or truncate) a genome to the full memory size
pub fn pad_to_memory(genome: &[i32]) -> Genome {
    let mut padded = genome[..genome.len().min(MEM_SIZE)].to_vec();
    padded.resize(MEM_SIZE, 0);
    padded
}

/// Segment crossover: the child starts as a copy of `other`, then 1..=max
/// segments are overwritten with segments drawn from either parent.
///
/// Source segments are indexed over `[other's segments.., dominant's segments..]`.
pub fn crossover<R: Rng>(
    dominant: &[i32],
    other: &[i32],
    params: &CrossoverParams,
    rng: &mut R,
) -> Genome {
    let dominant = pad_to_memory(dominant);
    let mut child = pad_to_memory(other);
    let source_other = child.clone();

    let segment_count = params.segment_count.max(1);
    let segment_len = MEM_SIZE / segment_count;
    let swaps = rng.gen_range(1..=params.max_chunk_swaps.max(1));

    for _ in 0..swaps {
        let source = rng.gen_range(0..segment_count * 2);
        let destination = rng.gen_range(0..segment_count);

        let (parent, segment) = if source < segment_count {
            (&source_other, source)
        } else {
            (&dominant, source - segment_count)
        };

        let from = segment * segment_len;
        let to = destination * segment_len;
        child[to..to + segment_len].copy_from_slice(&parent[from..from + segment_len]);
    }

    mutate(&mut child, params.mutation_rate, rng);
    child
}

/// Point mutation: overwrite `round(len * rate)` uniformly chosen words with
/// uniformly random values
pub fn mutate<R: Rng>(genome: &mut Genome, mutation_rate: f64, rng: &mut R) {
    if genome.is_empty() {
        return;
    }
    let count = (genome.len() as f64 * mutation_rate).round() as usize;
    for _ in 0..count {
        let index = rng.gen_range(0..genome.len());
        genome[index] = rng.gen();
    }
}

/// Generate random genome
pub fn random_genome<R: Rng>(length: usize, rng: &mut R) -> Genome {
    (0..length).map(|_| rng.gen()).collect()
}
