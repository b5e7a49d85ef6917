use crate::config::{AppConfig, EvolutionConfig, SimulationConfig, StorageConfig};
use crate::data::store::GenomeStore;
use crate::engines::generation::{
    fitness::{LifeCounters, UNMEASURED},
    genome::Genome,
    operators::{crossover, CrossoverParams},
    progress::ProgressCallback,
};
use crate::engines::simulation::{Board, Interpreter, StepOutcome};
use crate::error::Result;
use crate::types::{Cell, Fault};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How one genome's life ended
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeReport {
    pub slot: usize,
    pub generation: usize,
    pub fault: Fault,
    pub counters: LifeCounters,
    pub fitness: i64,
    /// Set when this life closed a pool cycle and triggered breeding
    pub bred: Option<GenerationSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: usize,
    pub best_slot: usize,
    pub best_fitness: i64,
    pub mean_fitness: f64,
    pub most_moves: u64,
    pub most_pellets: u32,
}

/// Result of `update`: the snake either moved or its life ended
#[derive(Debug, Clone)]
pub enum LifeProgress {
    Moved,
    Ended(LifeReport),
}

/// Best values ever seen across all lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestRecords {
    pub most_moves: u64,
    pub most_pellets: u32,
}

/// Pull-only view for renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub board_size: usize,
    pub cells: Vec<Cell>,
    pub active_slot: usize,
    pub generation: usize,
    pub records: BestRecords,
}

/// Cycles every pool slot through a VM life and breeds the pool after each
/// full cycle.
pub struct PopulationController<S: GenomeStore> {
    simulation: SimulationConfig,
    evolution: EvolutionConfig,
    storage: StorageConfig,
    store: S,
    rng: StdRng,
    fitness: Vec<i64>,
    active_slot: usize,
    generation: usize,
    interpreter: Interpreter,
    idle_steps: u64,
    records: BestRecords,
}

impl<S: GenomeStore> PopulationController<S> {
    pub fn new(config: &AppConfig, store: S) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.evolution.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let genome = Self::load_genome(&store, &config.storage, 0);
        let interpreter = Self::spawn(&config.simulation, &genome, &mut rng);

        Ok(Self {
            simulation: config.simulation.clone(),
            evolution: config.evolution.clone(),
            storage: config.storage.clone(),
            store,
            rng,
            fitness: vec![UNMEASURED; config.evolution.pool_size],
            active_slot: 0,
            generation: 0,
            interpreter,
            idle_steps: 0,
            records: BestRecords::default(),
        })
    }

    pub fn active_slot(&self) -> usize {
        self.active_slot
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn pool_size(&self) -> usize {
        self.fitness.len()
    }

    pub fn fitness(&self) -> &[i64] {
        &self.fitness
    }

    pub fn records(&self) -> BestRecords {
        self.records
    }

    pub fn board(&self) -> &Board {
        self.interpreter.board()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> PopulationSnapshot {
        let board = self.board();
        PopulationSnapshot {
            board_size: board.size(),
            cells: board.cells().to_vec(),
            active_slot: self.active_slot,
            generation: self.generation,
            records: self.records,
        }
    }

    fn load_genome(store: &S, storage: &StorageConfig, slot: usize) -> Genome {
        let name = storage.slot_name(slot);
        store.get(&name).unwrap_or_else(|| {
            log::warn!("No genome stored for {}, running an empty genome", name);
            Genome::new()
        })
    }

    fn spawn(simulation: &SimulationConfig, genome: &[i32], rng: &mut StdRng) -> Interpreter {
        let board_rng = StdRng::seed_from_u64(rng.gen());
        let board = Board::new(simulation.board_size, simulation.max_hunger, board_rng);
        Interpreter::new(genome, board)
    }

    /// Steps the active genome until the snake moves or its life ends
    pub fn update(&mut self) -> Result<LifeProgress> {
        loop {
            let ended = match self.interpreter.step() {
                StepOutcome::Moved => {
                    self.idle_steps = 0;
                    return Ok(LifeProgress::Moved);
                }
                StepOutcome::Faulted(Fault::DivByZero) if !self.simulation.div_by_zero_is_fatal => {
                    log::trace!("Gene #{} divided by zero", self.active_slot);
                    self.count_idle_step()
                }
                StepOutcome::Faulted(fault) => Some(fault),
                StepOutcome::Continued => self.count_idle_step(),
            };

            if let Some(fault) = ended {
                return Ok(LifeProgress::Ended(self.end_life(fault)));
            }
        }
    }

    fn count_idle_step(&mut self) -> Option<Fault> {
        self.idle_steps += 1;
        if self.idle_steps > self.simulation.stall_limit {
            Some(Fault::Stalled)
        } else {
            None
        }
    }

    /// Runs the active genome through a whole life and moves on to the next slot
    pub fn advance(&mut self) -> Result<LifeReport> {
        loop {
            if let LifeProgress::Ended(report) = self.update()? {
                return Ok(report);
            }
        }
    }

    /// Runs lives until `generations` breeding rounds have completed
    pub fn run_generations<C: ProgressCallback>(
        &mut self,
        generations: usize,
        callback: &mut C,
    ) -> Result<()> {
        let target = self.generation.saturating_add(generations);
        if generations > 0 {
            callback.on_generation_start(self.generation);
        }

        while self.generation < target {
            let report = self.advance()?;
            callback.on_life_complete(&report);

            if let Some(summary) = &report.bred {
                callback.on_generation_complete(summary);
                if self.generation < target {
                    callback.on_generation_start(self.generation);
                }
            }
        }

        Ok(())
    }

    fn end_life(&mut self, fault: Fault) -> LifeReport {
        let counters = LifeCounters {
            instructions: self.interpreter.executed(),
            movements: self.interpreter.moves(),
            pellets_eaten: self.interpreter.board().pellets_eaten(),
        };
        let fitness = counters.fitness();
        let slot = self.active_slot;
        self.fitness[slot] = fitness;

        self.records.most_moves = self.records.most_moves.max(counters.movements);
        self.records.most_pellets = self.records.most_pellets.max(counters.pellets_eaten);

        log::debug!(
            "Gene #{} has died: \"{}\" (fitness {}, {:?})",
            slot,
            fault,
            fitness,
            counters
        );

        let mut report = LifeReport {
            slot,
            generation: self.generation,
            fault,
            counters,
            fitness,
            bred: None,
        };

        let next = (slot + 1) % self.pool_size();
        if next == 0 {
            report.bred = Some(self.breed());
            self.generation += 1;
        }

        self.active_slot = next;
        self.idle_steps = 0;
        let genome = Self::load_genome(&self.store, &self.storage, next);
        self.interpreter = Self::spawn(&self.simulation, &genome, &mut self.rng);

        report
    }

    /// Best half survives into slots `0..half`; adjacent survivor pairs are
    /// crossed both ways to fill `half..pool_size`.
    ///
    /// A slot that fails to persist keeps its previous genome; the round still
    /// completes, so survivors are never re-read from half-rewritten slots.
    fn breed(&mut self) -> GenerationSummary {
        let pool_size = self.pool_size();
        let half = pool_size / 2;

        let mut ranked: Vec<usize> = (0..pool_size).collect();
        ranked.sort_by_key(|&slot| self.fitness[slot]);

        let mut next_generation: Vec<Genome> = ranked[..half]
            .iter()
            .map(|&slot| Self::load_genome(&self.store, &self.storage, slot))
            .collect();

        let params = CrossoverParams {
            segment_count: self.evolution.segment_count,
            max_chunk_swaps: self.evolution.max_chunk_swaps,
            mutation_rate: self.evolution.mutation_rate,
        };

        for k in (0..half).step_by(2) {
            let a = k;
            let b = (k + 1) % half;

            let child = crossover(&next_generation[a], &next_generation[b], &params, &mut self.rng);
            next_generation.push(child);
            if next_generation.len() < pool_size {
                let child =
                    crossover(&next_generation[b], &next_generation[a], &params, &mut self.rng);
                next_generation.push(child);
            }
        }
        next_generation.truncate(pool_size);

        for (slot, genome) in next_generation.iter().enumerate() {
            let name = self.storage.slot_name(slot);
            if let Err(e) = self.store.put(&name, genome) {
                log::warn!("Failed to store {}, keeping its previous genome: {}", name, e);
            }
        }

        let mean_fitness = self.fitness.iter().map(|&f| f as f64).sum::<f64>() / pool_size as f64;
        let summary = GenerationSummary {
            generation: self.generation,
            best_slot: ranked[0],
            best_fitness: self.fitness[ranked[0]],
            mean_fitness,
            most_moves: self.records.most_moves,
            most_pellets: self.records.most_pellets,
        };

        log::info!(
            "Generation {} bred: best fitness {} from slot {}, mean {:.2}",
            summary.generation,
            summary.best_fitness,
            summary.best_slot,
            summary.mean_fitness
        );

        self.fitness.fill(UNMEASURED);
        summary
    }
}
