//! Fixed-interval cycle scheduling and run lifecycle.
//!
//! The scheduler owns the engine for the duration of a run. Whatever
//! stops the run, every exit funnels through one cleanup path so the
//! final cancel-all happens exactly once.

use crate::cycle;
use crate::engine::QuoteEngine;
use orderly_exchange::Exchange;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopping,
    Stopped,
}

/// Why the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    DailyLossLimit,
    CycleLimit,
    DurationLimit,
    ShutdownSignal,
}

/// Optional bounds for a run; unbounded by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunBounds {
    pub max_cycles: Option<u64>,
    pub max_duration: Option<Duration>,
}

/// Summary returned when a run ends.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub cycles: u64,
    pub stop_reason: StopReason,
    pub elapsed: Duration,
}

pub struct Scheduler<E: Exchange> {
    engine: QuoteEngine<E>,
    interval: Duration,
    bounds: RunBounds,
    state: SchedulerState,
}

impl<E: Exchange> Scheduler<E> {
    pub fn new(engine: QuoteEngine<E>, bounds: RunBounds) -> Self {
        let interval = Duration::from_secs(engine.config().execution.requote_interval_secs);
        Self {
            engine,
            interval,
            bounds,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Drive cycles until a breaker, a bound, or the shutdown future
    /// stops the run.
    pub async fn run(&mut self, shutdown: impl Future<Output = ()>) -> RunReport {
        let config = self.engine.config();
        info!(
            symbol = %config.symbol,
            base_spread_bps = %config.spread.base_spread_bps,
            order_size_usd = %config.sizing.order_size_usd,
            interval_secs = config.execution.requote_interval_secs,
            daily_loss_limit_usd = %config.risk.daily_loss_limit_usd,
            mode = if config.flags.dry_run { "dry-run" } else { "live" },
            "market maker starting"
        );
        let log_quotes = config.flags.log_quotes;

        self.state = SchedulerState::Running;
        tokio::pin!(shutdown);
        let started = Instant::now();
        let mut cycles = 0u64;

        let stop_reason = loop {
            let result = self.engine.run_cycle().await;
            cycle::log_cycle(&result, log_quotes);
            cycles += 1;

            if result.outcome.halts_run() {
                break StopReason::DailyLossLimit;
            }
            if let Some(max) = self.bounds.max_cycles {
                if cycles >= max {
                    break StopReason::CycleLimit;
                }
            }
            if let Some(max) = self.bounds.max_duration {
                if started.elapsed() >= max {
                    break StopReason::DurationLimit;
                }
            }

            tokio::select! {
                _ = &mut shutdown => break StopReason::ShutdownSignal,
                _ = tokio::time::sleep(self.interval) => {}
            }
        };

        // Single cleanup path for every stop reason.
        self.state = SchedulerState::Stopping;
        self.engine.shutdown().await;
        self.state = SchedulerState::Stopped;

        let report = RunReport {
            cycles,
            stop_reason,
            elapsed: started.elapsed(),
        };
        info!(
            cycles = report.cycles,
            stop_reason = ?report.stop_reason,
            "session ended"
        );
        report
    }
}
