//! Dice simulator CLI - plays many in-memory sessions with chosen providers.
//!
//! Each game gets its own seed (derived from `--seed` when given), so a run
//! with a fixed seed is reproducible as long as no seat hits its time budget.

mod metrics;
mod output;
mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use dice_engine::ai::{by_name, registered_providers, AiConfig, DecisionProvider};
use dice_engine::{GameOutcome, GameSession, SessionConfig, TracingObserver};
use metrics::build_game_metrics;
use output::OutputWriter;
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "dice-simulator")]
#[command(about = "In-memory Liar's Dice simulator for comparing decision providers")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players per table
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// Provider per seat, comma separated; the last one fills remaining seats
    #[arg(long, value_delimiter = ',', default_value = "Heuristic,RandomPlayer")]
    seats: Vec<String>,

    /// Dice each player starts with
    #[arg(long, default_value = "5")]
    starting_dice: u32,

    /// Count ones as every face when resolving challenges
    #[arg(long)]
    wild_ones: bool,

    /// Per-attempt provider budget in milliseconds
    #[arg(long, default_value = "1000")]
    time_budget_ms: u64,

    /// Provider calls per turn before the fallback applies
    #[arg(long, default_value = "3")]
    max_attempts: u32,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// Provider config as JSON, applied to every seat (seeds are set per seat)
    #[arg(long)]
    provider_config: Option<String>,

    /// Include the full event history in each JSONL record
    #[arg(long)]
    history: bool,

    /// Log every turn
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// List registered providers and exit
    #[arg(long)]
    list_providers: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "info,dice_engine=debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    dice_engine::telemetry::init_tracing(filter);

    if args.list_providers {
        for factory in registered_providers() {
            println!("{} v{}", factory.name, factory.version);
        }
        return Ok(());
    }

    let seat_names = resolve_seats(&args.seats, args.players)?;
    let base_config: serde_json::Value = match &args.provider_config {
        Some(raw) => serde_json::from_str(raw)?,
        None => serde_json::json!({}),
    };
    if !base_config.is_object() {
        return Err("--provider-config must be a JSON object".into());
    }

    if args.show_output {
        info!(games = args.games, players = args.players, seats = ?seat_names, "Starting dice simulator");
    }

    let mut output_writer = OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;

    let start = Instant::now();
    let mut results: Vec<GameOutcome> = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_seed = match args.seed {
            Some(s) => s.wrapping_add(game_num as u64),
            None => rand::random(),
        };
        let config = SessionConfig {
            num_players: args.players,
            starting_dice: args.starting_dice,
            wild_ones: args.wild_ones,
            time_budget: Duration::from_millis(args.time_budget_ms),
            max_attempts: args.max_attempts,
            seed: Some(game_seed),
            ..SessionConfig::default()
        };

        let game_start = Instant::now();
        match run_game(&config, &seat_names, &base_config, args.verbose).await {
            Ok(outcome) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    game_seed,
                    &seat_names,
                    outcome.clone(),
                    duration_ms,
                    args.history,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                results.push(outcome);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, &seat_names, errors, elapsed, args.games);
    }

    Ok(())
}

/// Expand the `--seats` list to one registered provider name per seat.
fn resolve_seats(seats: &[String], players: usize) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let last = seats.last().ok_or("at least one provider is required")?;
    (0..players)
        .map(|seat| {
            let name = seats.get(seat).unwrap_or(last);
            by_name(name)
                .map(|factory| factory.name.to_string())
                .ok_or_else(|| Box::<dyn std::error::Error>::from(format!("Unknown provider: {name}")))
        })
        .collect()
}

async fn run_game(
    config: &SessionConfig,
    seat_names: &[String],
    base_config: &serde_json::Value,
    verbose: bool,
) -> Result<GameOutcome, Box<dyn std::error::Error>> {
    let game_seed = config.seed.unwrap_or_default();
    let providers = seat_names
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            let mut json = base_config.clone();
            json["seed"] = serde_json::json!(game_seed.wrapping_mul(31).wrapping_add(seat as u64));
            let factory = by_name(name).ok_or_else(|| format!("Unknown provider: {name}"))?;
            Ok((factory.make)(&AiConfig::from_json(Some(&json))))
        })
        .collect::<Result<Vec<Arc<dyn DecisionProvider>>, String>>()?;

    let mut session = GameSession::new(config, providers)?;
    if verbose {
        session = session.with_observer(TracingObserver);
    }
    Ok(session.run().await?)
}

fn print_summary(
    results: &[GameOutcome],
    seat_names: &[String],
    errors: u32,
    elapsed: Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    println!("Average time per game: {:?}", elapsed / results.len() as u32);

    let seats = seat_names.len();
    let mut wins = vec![0u32; seats];
    let mut fallbacks = vec![0u64; seats];
    let mut rounds = 0u64;
    for result in results {
        if let Some(w) = result.winner {
            wins[w] += 1;
        }
        for (seat, f) in result.fallbacks.iter().enumerate() {
            fallbacks[seat] += *f as u64;
        }
        rounds += result.rounds_played as u64;
    }

    println!("Average rounds per game: {:.1}", rounds as f64 / results.len() as f64);
    println!("\n=== Results by Seat ===");
    for seat in 0..seats {
        let win_rate = (wins[seat] as f64 / results.len() as f64) * 100.0;
        println!(
            "Seat {} ({}): wins={} ({:.1}%), fallbacks={}",
            seat, seat_names[seat], wins[seat], win_rate, fallbacks[seat]
        );
    }
}
