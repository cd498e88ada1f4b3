//! Cycle results and their logging.

use crate::quote::Quote;
use chrono::{DateTime, Utc};
use orderly_core::{OrderId, Price};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::{error, info, warn};

/// What a single cycle ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleOutcome {
    Quoted,
    DryRun,
    VolatilityPaused,
    StopLossTriggered,
    TakeProfitTriggered,
    DailyLossLimitHit,
    MaxInventory,
    Error,
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quoted => "quoted",
            Self::DryRun => "dry_run",
            Self::VolatilityPaused => "volatility_paused",
            Self::StopLossTriggered => "stop_loss_triggered",
            Self::TakeProfitTriggered => "take_profit_triggered",
            Self::DailyLossLimitHit => "daily_loss_limit_hit",
            Self::MaxInventory => "max_inventory",
            Self::Error => "error",
        }
    }

    /// Only the daily-loss breaker ends the whole run.
    pub fn halts_run(&self) -> bool {
        matches!(self, Self::DailyLossLimitHit)
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one order placement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegResult {
    Placed(OrderId),
    Failed(String),
}

/// Structured summary of one cycle, returned whatever happened.
#[derive(Debug, Clone)]
pub struct CycleResult {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub outcome: CycleOutcome,
    pub mid: Option<Price>,
    pub volatility_pct: Decimal,
    pub inventory_usd: Decimal,
    pub session_pnl: Option<Decimal>,
    pub quote: Option<Quote>,
    pub bid: Option<LegResult>,
    pub ask: Option<LegResult>,
    pub error: Option<String>,
}

impl CycleResult {
    /// A cycle that died before producing market context.
    pub fn aborted(symbol: &str, session_pnl: Option<Decimal>, error: String) -> Self {
        Self {
            timestamp: Utc::now(),
            symbol: symbol.to_string(),
            outcome: CycleOutcome::Error,
            mid: None,
            volatility_pct: Decimal::ZERO,
            inventory_usd: Decimal::ZERO,
            session_pnl,
            quote: None,
            bid: None,
            ask: None,
            error: Some(error),
        }
    }
}

fn leg_summary(leg: &Option<LegResult>) -> String {
    match leg {
        Some(LegResult::Placed(id)) => id.to_string(),
        Some(LegResult::Failed(e)) => format!("failed: {e}"),
        None => "-".to_string(),
    }
}

/// Emit exactly one log record per cycle.
pub fn log_cycle(result: &CycleResult, log_quotes: bool) {
    match result.outcome {
        CycleOutcome::Error => {
            error!(
                symbol = %result.symbol,
                error = result.error.as_deref().unwrap_or("unknown"),
                "cycle aborted"
            );
        }
        CycleOutcome::DailyLossLimitHit => {
            error!(
                symbol = %result.symbol,
                session_pnl = %result.session_pnl.unwrap_or_default(),
                "daily loss limit hit, halting run"
            );
        }
        CycleOutcome::StopLossTriggered | CycleOutcome::TakeProfitTriggered => {
            warn!(
                symbol = %result.symbol,
                outcome = %result.outcome,
                inventory_usd = %result.inventory_usd,
                "position closed by risk monitor"
            );
        }
        CycleOutcome::VolatilityPaused => {
            warn!(
                symbol = %result.symbol,
                volatility_pct = %result.volatility_pct,
                "quoting paused on volatility"
            );
        }
        CycleOutcome::MaxInventory => {
            warn!(
                symbol = %result.symbol,
                inventory_usd = %result.inventory_usd,
                "inventory cap reached, orders cancelled"
            );
        }
        CycleOutcome::Quoted | CycleOutcome::DryRun => {
            if !log_quotes {
                return;
            }
            let (bid, ask, size, spread) = match &result.quote {
                Some(q) => (
                    q.bid.to_string(),
                    q.ask.to_string(),
                    q.size.to_string(),
                    q.spread_bps.to_string(),
                ),
                None => ("-".into(), "-".into(), "-".into(), "-".into()),
            };
            info!(
                symbol = %result.symbol,
                outcome = %result.outcome,
                bid = %bid,
                ask = %ask,
                size = %size,
                spread_bps = %spread,
                volatility_pct = %result.volatility_pct,
                inventory_usd = %result.inventory_usd,
                bid_leg = %leg_summary(&result.bid),
                ask_leg = %leg_summary(&result.ask),
                "cycle complete"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_daily_loss_halts() {
        for outcome in [
            CycleOutcome::Quoted,
            CycleOutcome::DryRun,
            CycleOutcome::VolatilityPaused,
            CycleOutcome::StopLossTriggered,
            CycleOutcome::TakeProfitTriggered,
            CycleOutcome::MaxInventory,
            CycleOutcome::Error,
        ] {
            assert!(!outcome.halts_run(), "{outcome} should not halt");
        }
        assert!(CycleOutcome::DailyLossLimitHit.halts_run());
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(CycleOutcome::Quoted.as_str(), "quoted");
        assert_eq!(CycleOutcome::DailyLossLimitHit.as_str(), "daily_loss_limit_hit");
    }

    #[test]
    fn test_aborted_result() {
        let r = CycleResult::aborted("PERP_ETH_USDC", None, "timeout".into());
        assert_eq!(r.outcome, CycleOutcome::Error);
        assert!(r.mid.is_none());
        assert_eq!(r.error.as_deref(), Some("timeout"));
    }
}
