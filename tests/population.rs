use simsnake::config::AppConfig;
use simsnake::data::{GenomeStore, MemoryGenomeStore};
use simsnake::engines::generation::{
    GenerationSummary, LifeProgress, LifeReport, PopulationController, ProgressCallback,
    UNMEASURED,
};
use simsnake::engines::simulation::{Opcode, MEM_SIZE};
use simsnake::types::Fault;

fn op(opcode: Opcode) -> i32 {
    opcode.as_i32()
}

/// Small seeded pool on an 8x8 board
fn test_config(pool_size: usize) -> AppConfig {
    let mut config = AppConfig::default();
    config.simulation.board_size = 8;
    config.simulation.stall_limit = 50;
    config.evolution.pool_size = pool_size;
    config.evolution.seed = Some(2024);
    config
}

/// Runs right into the wall; the trailing marker word is never executed
fn right_runner(marker: i32) -> Vec<i32> {
    vec![op(Opcode::GoRight), op(Opcode::Jmp), -1, marker]
}

fn store_with(genomes: &[Vec<i32>]) -> MemoryGenomeStore {
    let mut store = MemoryGenomeStore::new();
    for (slot, genome) in genomes.iter().enumerate() {
        store.put(&format!("Gene{}", slot), genome).unwrap();
    }
    store
}

#[derive(Default)]
struct RecordingCallback {
    started: Vec<usize>,
    completed: Vec<GenerationSummary>,
    lives: usize,
}

impl ProgressCallback for RecordingCallback {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        self.completed.push(summary.clone());
    }

    fn on_life_complete(&mut self, _report: &LifeReport) {
        self.lives += 1;
    }
}

#[test]
fn test_full_cycle_breeds_pool() {
    let genomes: Vec<Vec<i32>> = (0..4).map(|i| right_runner(1000 + i)).collect();
    let mut controller = PopulationController::new(&test_config(4), store_with(&genomes)).unwrap();

    let mut reports = Vec::new();
    for slot in 0..4 {
        assert_eq!(controller.active_slot(), slot);
        let report = controller.advance().unwrap();
        assert_eq!(report.slot, slot);
        assert_eq!(report.fault, Fault::OutOfBoard);
        assert_eq!(report.counters.movements, 3);
        reports.push(report);
    }

    // Only the life that closes the cycle breeds
    assert!(reports[..3].iter().all(|r| r.bred.is_none()));
    let summary = reports[3].bred.clone().expect("last life should breed");
    assert_eq!(summary.generation, 0);

    let mut ranked: Vec<usize> = (0..4).collect();
    ranked.sort_by_key(|&slot| reports[slot].fitness);
    assert_eq!(summary.best_slot, ranked[0]);

    let store = controller.store();
    assert_eq!(store.get("Gene0"), Some(genomes[ranked[0]].clone()));
    assert_eq!(store.get("Gene1"), Some(genomes[ranked[1]].clone()));
    for child in ["Gene2", "Gene3"] {
        assert_eq!(store.get(child).unwrap().len(), MEM_SIZE);
    }

    assert_eq!(controller.generation(), 1);
    assert_eq!(controller.active_slot(), 0);
    assert!(controller.fitness().iter().all(|&f| f == UNMEASURED));
    assert_eq!(controller.records().most_moves, 3);
}

#[test]
fn test_run_generations_reports_progress() {
    let genomes: Vec<Vec<i32>> = (0..4).map(|i| right_runner(i)).collect();
    let mut controller = PopulationController::new(&test_config(4), store_with(&genomes)).unwrap();

    let mut callback = RecordingCallback::default();
    controller.run_generations(2, &mut callback).unwrap();

    assert_eq!(controller.generation(), 2);
    assert_eq!(callback.lives, 8);
    assert_eq!(callback.started, vec![0, 1]);
    let finished: Vec<usize> = callback.completed.iter().map(|s| s.generation).collect();
    assert_eq!(finished, vec![0, 1]);
}

#[test]
fn test_update_yields_moves_before_death() {
    let genomes = vec![right_runner(0), right_runner(1)];
    let mut controller = PopulationController::new(&test_config(2), store_with(&genomes)).unwrap();

    let mut moves = 0;
    let report = loop {
        match controller.update().unwrap() {
            LifeProgress::Moved => {
                moves += 1;
                assert_eq!(controller.snapshot().board_size, 8);
            }
            LifeProgress::Ended(report) => break report,
        }
    };

    assert_eq!(moves, 3);
    assert_eq!(report.fault, Fault::OutOfBoard);
    assert_eq!(controller.active_slot(), 1);
    // The next life starts on a fresh board
    assert_eq!(controller.board().snake_len(), 1);
}

#[test]
fn test_empty_pool_stalls_without_crashing() {
    let mut controller =
        PopulationController::new(&test_config(2), MemoryGenomeStore::new()).unwrap();

    let first = controller.advance().unwrap();
    let second = controller.advance().unwrap();
    assert_eq!(first.fault, Fault::Stalled);
    assert_eq!(second.fault, Fault::Stalled);
    assert_eq!(first.counters.instructions, 51);
    assert!(second.bred.is_some());

    // Breeding persisted every slot, even from empty parents
    assert!(controller.store().contains("Gene0"));
    assert!(controller.store().contains("Gene1"));
}

#[test]
fn test_div_by_zero_policy() {
    let looping_div = vec![op(Opcode::Div), op(Opcode::Jmp), -1];

    let mut config = test_config(2);
    let mut controller =
        PopulationController::new(&config, store_with(&[looping_div.clone(), looping_div.clone()]))
            .unwrap();
    let report = controller.advance().unwrap();
    assert_eq!(report.fault, Fault::DivByZero);
    assert_eq!(report.counters.instructions, 1);

    config.simulation.div_by_zero_is_fatal = false;
    let mut controller =
        PopulationController::new(&config, store_with(&[looping_div.clone(), looping_div]))
            .unwrap();
    let report = controller.advance().unwrap();
    assert_eq!(report.fault, Fault::Stalled);
    assert_eq!(report.counters.instructions, 51);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = test_config(3);
    assert!(PopulationController::new(&config, MemoryGenomeStore::new()).is_err());
}
