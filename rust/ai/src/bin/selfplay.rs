//! Self-play runner
//!
//! Usage: cargo run -p indian-poker-ai --bin selfplay -- --hands 1000 --agents rule,random

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use indian_poker_ai::arena::{Arena, ArenaConfig};
use indian_poker_ai::logging::init_logging;
use indian_poker_ai::{ArenaError, create_agent};
use indian_poker_engine::config::GameConfig;
use indian_poker_engine::logger::HandLogger;

#[derive(Debug, Parser)]
#[command(name = "selfplay", about = "Play Indian poker hands between agents")]
struct Args {
    /// Number of hands to play
    #[arg(long, default_value_t = 100)]
    hands: u64,
    /// Seed for the deck and the random agents
    #[arg(long)]
    seed: Option<u64>,
    /// Table configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Comma-separated agent kinds, one per seat
    #[arg(long, value_delimiter = ',', default_value = "rule,random")]
    agents: Vec<String>,
    /// Write hand histories here (JSONL)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Log a line per settled hand
    #[arg(long)]
    log_results: bool,
    /// Start a fresh session every hand instead of playing until one seat has every chip
    #[arg(long)]
    no_continue: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging("info,indian_poker_engine=warn");
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<(), ArenaError> {
    let mut game_config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    }
    .apply_env()?;
    if args.seed.is_some() {
        game_config.seed = args.seed;
    }
    // one seat per agent
    game_config.num_players = args.agents.len();
    game_config.validate()?;

    let agents = args
        .agents
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let seed = game_config.seed.map(|s| s.wrapping_add(1 + i as u64));
            create_agent(kind.trim(), seed)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let names: Vec<String> = agents.iter().map(|a| a.name().to_string()).collect();

    let arena_config = ArenaConfig {
        continue_session: !args.no_continue,
        log_results: args.log_results,
    };
    let mut arena = Arena::new(game_config, agents, arena_config)?;
    if let Some(path) = &args.output {
        arena = arena.with_logger(HandLogger::create(path)?);
    }

    let mut totals = vec![0i64; names.len()];
    for _ in 0..args.hands {
        let (_, payoffs) = arena.run(false)?;
        for (t, p) in totals.iter_mut().zip(&payoffs) {
            *t += p;
        }
    }

    let stats = arena.stats();
    println!("hands: {}", stats.hands_played);
    for (seat, name) in names.iter().enumerate() {
        println!(
            "seat {} {:<12} wins {:>6}  net {:>+8}  stack {}",
            seat, name, stats.wins[seat], totals[seat], stats.chips[seat]
        );
    }
    Ok(())
}
