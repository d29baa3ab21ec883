//! Standalone bot-vs-bot series runner.
//!
//! Run with:
//! `cargo run --release --bin bot_match -- --games 20 --player1 smart --player2 random`

use std::error::Error;
use std::time::Duration;

use chess_bot_host::bots::bot_random::RandomBot;
use chess_bot_host::bots::bot_smart::SmartBot;
use chess_bot_host::bots::bot_trait::ChessBot;
use chess_bot_host::host::bot_match::{play_bot_match_series, MatchSeriesConfig};
use chess_bot_host::host::host_config::HostConfig;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BotKind {
    Random,
    Smart,
}

impl BotKind {
    fn build(self, seed: u64) -> Box<dyn ChessBot> {
        match self {
            BotKind::Random => Box::new(RandomBot::with_seed(seed)),
            BotKind::Smart => Box::new(SmartBot::with_seed(seed)),
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Run a series of games between two built-in bots")]
struct Args {
    #[arg(long, value_enum, default_value_t = BotKind::Smart)]
    player1: BotKind,

    #[arg(long, value_enum, default_value_t = BotKind::Random)]
    player2: BotKind,

    #[arg(long, default_value_t = 10)]
    games: u16,

    /// Games still running after this many plies are scored as draws.
    #[arg(long, default_value_t = 200)]
    max_plies: u16,

    #[arg(long, default_value_t = 2000)]
    move_time_ms: u64,

    #[arg(long, default_value_t = 1234)]
    seed: u64,

    /// Print every game outcome after the summary.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = MatchSeriesConfig {
        games: args.games,
        per_game: HostConfig {
            move_time_budget: Duration::from_millis(args.move_time_ms),
            max_plies: args.max_plies,
            seed: args.seed,
            ..HostConfig::default()
        },
    };

    let player1 = args.player1;
    let player2 = args.player2;
    let stats = play_bot_match_series(
        |seed| player1.build(seed),
        |seed| player2.build(seed.wrapping_mul(31).wrapping_add(7)),
        &config,
    )?;

    println!("{}", stats.report());
    if args.verbose {
        println!("outcomes: {:?}", stats.outcomes);
    }
    Ok(())
}
