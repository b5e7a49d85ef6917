use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simsnake::config::{AppConfig, ConfigManager};
use simsnake::data::{seed_pool, Assembler, FileGenomeStore, GenomeCodec};
use simsnake::engines::generation::{
    ConsoleProgressCallback, JsonLinesProgressCallback, LifeProgress, PopulationController,
    PopulationSnapshot,
};
use simsnake::types::Cell;
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

const USAGE: &str = "\
Usage:
  simsnake run [--config PATH] [--generations N] [--render] [--delay-ms N] [--json PATH]
  simsnake assemble <script> <out>";

#[derive(Debug, Default)]
struct RunOptions {
    config: Option<PathBuf>,
    generations: Option<usize>,
    render: bool,
    delay_ms: u64,
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("run") => run(parse_run_options(&args[1..])?),
        Some("assemble") => match (args.get(1), args.get(2)) {
            (Some(script), Some(out)) => assemble(script, out),
            _ => bail!("assemble needs a script and an output path\n{}", USAGE),
        },
        _ => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

fn parse_run_options(args: &[String]) -> Result<RunOptions> {
    let mut options = RunOptions::default();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--render" => options.render = true,
            "--config" => options.config = Some(next_value(&mut iter, flag)?.into()),
            "--json" => options.json = Some(next_value(&mut iter, flag)?.into()),
            "--generations" => {
                let value = next_value(&mut iter, flag)?;
                options.generations = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid generation count: {}", value))?,
                );
            }
            "--delay-ms" => {
                let value = next_value(&mut iter, flag)?;
                options.delay_ms = value
                    .parse()
                    .with_context(|| format!("Invalid delay: {}", value))?;
            }
            other => bail!("Unknown option {}\n{}", other, USAGE),
        }
    }

    Ok(options)
}

fn next_value<'a, I: Iterator<Item = &'a String>>(iter: &mut I, flag: &str) -> Result<&'a str> {
    iter.next()
        .map(String::as_str)
        .with_context(|| format!("{} expects a value", flag))
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let mut manager = ConfigManager::new();
    match path {
        Some(path) => manager
            .load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => manager.load_from_env()?,
    }
    Ok(manager.get())
}

fn run(options: RunOptions) -> Result<()> {
    let config = load_config(options.config.as_ref())?;

    let mut store = FileGenomeStore::new(&config.storage.genome_dir)
        .with_context(|| format!("Cannot open {}", config.storage.genome_dir.display()))?;

    let mut seed_rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let seeded = seed_pool(&mut store, &config.storage, config.evolution.pool_size, &mut seed_rng)?;
    if seeded > 0 {
        log::info!("Seeded {} genomes into {}", seeded, store.dir().display());
    }

    let mut controller = PopulationController::new(&config, store)?;
    let generations = options.generations.unwrap_or(usize::MAX);

    if options.render {
        return render_loop(&mut controller, generations, options.delay_ms);
    }

    match &options.json {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create {}", path.display()))?;
            let mut callback = JsonLinesProgressCallback::new(BufWriter::new(file));
            controller.run_generations(generations, &mut callback)?;
        }
        None => controller.run_generations(generations, &mut ConsoleProgressCallback)?,
    }

    Ok(())
}

fn render_loop(
    controller: &mut PopulationController<FileGenomeStore>,
    generations: usize,
    delay_ms: u64,
) -> Result<()> {
    let target = controller.generation().saturating_add(generations);
    let delay = Duration::from_millis(delay_ms);

    while controller.generation() < target {
        match controller.update()? {
            LifeProgress::Moved => {
                println!("{}", render(&controller.snapshot()));
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }
            LifeProgress::Ended(report) => {
                println!(
                    "Gene #{} has died: \"{}\" ({} moves, {} pellets, fitness {})",
                    report.slot,
                    report.fault,
                    report.counters.movements,
                    report.counters.pellets_eaten,
                    report.fitness
                );
                if let Some(summary) = report.bred {
                    println!(
                        "Generation {} bred. Best fitness {} from Gene #{}",
                        summary.generation, summary.best_fitness, summary.best_slot
                    );
                }
            }
        }
    }

    Ok(())
}

fn render(snapshot: &PopulationSnapshot) -> String {
    let size = snapshot.board_size;
    let border = format!("+{}+", "-".repeat(size));

    let mut out = format!(
        "Gene #{}, Generation Count #{}\nMost moves: {}, most pellets: {}\n{}\n",
        snapshot.active_slot,
        snapshot.generation,
        snapshot.records.most_moves,
        snapshot.records.most_pellets,
        border
    );
    for row in snapshot.cells.chunks(size.max(1)) {
        out.push('|');
        out.extend(row.iter().map(|cell| match cell {
            Cell::Empty => ' ',
            Cell::Snake => '#',
            Cell::Pellet => 'x',
        }));
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}

fn assemble(script: &str, out: &str) -> Result<()> {
    let assembly =
        Assembler::load_file(script).with_context(|| format!("Failed to assemble {}", script))?;

    let mut rng = StdRng::from_entropy();
    let genome = GenomeCodec::export_padded(&assembly.genome, &mut rng);
    std::fs::write(out, GenomeCodec::encode(&genome))
        .with_context(|| format!("Cannot write {}", out))?;

    println!(
        "Assembled {} words ({} labels) from {} into {}",
        assembly.genome.len(),
        assembly.labels.len(),
        script,
        out
    );
    Ok(())
}
