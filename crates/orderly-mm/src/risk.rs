//! Risk monitor: decides each cycle whether quoting is allowed.
//!
//! Checks run in strict precedence order and the first breach wins:
//! daily loss -> stop loss -> take profit -> volatility pause ->
//! inventory cap -> quote. Ordering matters: a stop-loss close must not
//! be skipped because volatility is also high.

use crate::config::MakerConfig;
use orderly_core::Position;
use rust_decimal::Decimal;

/// Which sides may be quoted this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideGate {
    pub place_bid: bool,
    pub place_ask: bool,
}

impl SideGate {
    pub const BOTH: Self = Self {
        place_bid: true,
        place_ask: true,
    };
}

/// Outcome of the risk assessment, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskDecision {
    /// Session drawdown breached the daily limit; the run must halt.
    DailyLossHalt { session_pnl: Decimal },
    /// Unrealized loss breached the stop; close the position.
    StopLoss { pnl_pct: Decimal },
    /// Unrealized gain breached the target; close the position.
    TakeProfit { pnl_pct: Decimal },
    /// Market too volatile to quote; stand aside this cycle.
    VolatilityPause { volatility_pct: Decimal },
    /// Inventory at the hard cap; no quoting until it unwinds.
    InventoryCap { inventory_usd: Decimal },
    /// Quoting permitted, possibly on one side only.
    Quote(SideGate),
}

/// Fraction of `max_position_usd` at which the accumulating side stops.
const SUPPRESS_RATIO: Decimal = Decimal::from_parts(8, 0, 0, false, 1); // 0.8

/// Evaluate all risk rules for one cycle.
///
/// `session_pnl` is `None` when the collateral read failed; only the
/// daily-loss rule is skipped in that case.
pub fn assess(
    session_pnl: Option<Decimal>,
    position: Option<&Position>,
    volatility_pct: Decimal,
    inventory_usd: Decimal,
    config: &MakerConfig,
) -> RiskDecision {
    if let Some(pnl) = session_pnl {
        if pnl <= -config.risk.daily_loss_limit_usd {
            return RiskDecision::DailyLossHalt { session_pnl: pnl };
        }
    }

    if let Some(pos) = position.filter(|p| !p.is_flat()) {
        let pnl_pct = pos.pnl_percent();
        if pnl_pct <= -config.risk.stop_loss_pct {
            return RiskDecision::StopLoss { pnl_pct };
        }
        if pnl_pct >= config.risk.take_profit_pct {
            return RiskDecision::TakeProfit { pnl_pct };
        }
    }

    if config.volatility.enabled && volatility_pct > config.volatility.pause_threshold_pct {
        return RiskDecision::VolatilityPause { volatility_pct };
    }

    if inventory_usd.abs() >= config.risk.max_position_usd {
        return RiskDecision::InventoryCap { inventory_usd };
    }

    let suppress_at = config.risk.max_position_usd * SUPPRESS_RATIO;
    RiskDecision::Quote(SideGate {
        place_bid: inventory_usd < suppress_at,
        place_ask: inventory_usd > -suppress_at,
    })
}
