use super::population::{GenerationSummary, LifeReport};
use std::io::Write;

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, summary: &GenerationSummary);
    fn on_life_complete(&mut self, report: &LifeReport);
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        println!("Generation {} starting...", generation);
    }

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        println!(
            "Generation {} complete. Best fitness: {} (slot {}), most moves: {}, most pellets: {}",
            summary.generation,
            summary.best_fitness,
            summary.best_slot,
            summary.most_moves,
            summary.most_pellets
        );
    }

    fn on_life_complete(&mut self, report: &LifeReport) {
        println!(
            "  Gene #{} died: \"{}\" (fitness {}, {} moves, {} pellets)",
            report.slot,
            report.fault,
            report.fitness,
            report.counters.movements,
            report.counters.pellets_eaten
        );
    }
}

/// Writes one JSON object per finished generation, for external dashboards
pub struct JsonLinesProgressCallback<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesProgressCallback<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProgressCallback for JsonLinesProgressCallback<W> {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, summary: &GenerationSummary) {
        let written = serde_json::to_writer(&mut self.writer, summary)
            .map_err(std::io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush());
        if let Err(e) = written {
            log::warn!("Failed to write generation summary: {}", e);
        }
    }

    fn on_life_complete(&mut self, _report: &LifeReport) {}
}
