//! Market-making bot entry point.
//!
//! Wires the simulated venue, the quote engine and the scheduler, then
//! runs until Ctrl-C, a run bound, or the daily-loss breaker stops it.

use anyhow::Result;
use clap::Parser;
use orderly_exchange::SimExchange;
use orderly_mm::{QuoteEngine, RunBounds, Scheduler};
use std::time::Duration;
use tracing::info;

/// Single-symbol market-making bot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via ORDERLY_MM_CONFIG)
    #[arg(short, long)]
    config: Option<String>,

    /// Stop after this many seconds
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Stop after this many cycles
    #[arg(long)]
    max_cycles: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    orderly_bot::init_logging()?;
    info!("Starting orderly-bot v{}", env!("CARGO_PKG_VERSION"));

    let config_path = args
        .config
        .or_else(|| std::env::var("ORDERLY_MM_CONFIG").ok());
    let mut config = orderly_bot::AppConfig::load(config_path.as_deref())?;

    // CLI bounds override the config file.
    if args.duration_secs.is_some() {
        config.run.duration_secs = args.duration_secs;
    }
    if args.max_cycles.is_some() {
        config.run.max_cycles = args.max_cycles;
    }

    let exchange = SimExchange::new(config.sim.mid, config.sim.spread_bps, config.sim.collateral);
    let engine = QuoteEngine::new(exchange, config.maker)?;
    let bounds = RunBounds {
        max_cycles: config.run.max_cycles,
        max_duration: config.run.duration_secs.map(Duration::from_secs),
    };

    let mut scheduler = Scheduler::new(engine, bounds);
    let report = scheduler
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;

    info!(
        cycles = report.cycles,
        stop_reason = ?report.stop_reason,
        elapsed_secs = report.elapsed.as_secs(),
        "bot exited"
    );
    Ok(())
}
