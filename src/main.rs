//! Console driver: play against the built-in bots from a terminal.
//!
//! Run with:
//! `cargo run --release -- --move-time-ms 1000 --fallback retry`
//! Set `RUST_LOG=debug` to see every executed move.

use std::error::Error;
use std::time::Duration;

use chess_bot_host::console::console_top::run_stdio_loop;
use chess_bot_host::host::host_config::{FallbackPolicy, HostConfig};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FallbackArg {
    Forfeit,
    Retry,
    Substitute,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Forfeit => FallbackPolicy::Forfeit,
            FallbackArg::Retry => FallbackPolicy::Retry,
            FallbackArg::Substitute => FallbackPolicy::SubstituteFirstLegal,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Play chess against plugin bots on the console")]
struct Args {
    /// Time budget for one bot move in milliseconds.
    #[arg(long, default_value_t = 2000)]
    move_time_ms: u64,

    /// What happens when a bot returns an unusable move.
    #[arg(long, value_enum, default_value_t = FallbackArg::Substitute)]
    fallback: FallbackArg,

    /// Extra attempts a bot gets under the retry policy.
    #[arg(long, default_value_t = 1)]
    max_retries: u8,

    /// Seed for the built-in bots; 0 seeds from the OS.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = HostConfig {
        move_time_budget: Duration::from_millis(args.move_time_ms),
        fallback: args.fallback.into(),
        max_retries: args.max_retries,
        seed: args.seed,
        ..HostConfig::default()
    };

    run_stdio_loop(config)?;
    Ok(())
}
