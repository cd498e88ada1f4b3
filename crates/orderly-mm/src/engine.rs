//! The quote engine: one full market-making cycle per call.
//!
//! A cycle is a straight pipeline: read collateral, read market data,
//! update volatility, read position, ask the risk monitor, then either
//! perform the breaker's recovery or replace the resting quotes. The
//! engine is generic over the venue and holds all per-session state.

use crate::config::MakerConfig;
use crate::cycle::{CycleOutcome, CycleResult, LegResult};
use crate::error::MmResult;
use crate::quote;
use crate::risk::{self, RiskDecision, SideGate};
use crate::state::RunState;
use crate::volatility::VolatilityTracker;
use chrono::Utc;
use orderly_core::{OrderSide, Price, Size};
use orderly_exchange::{Exchange, OrderRequest};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Wait after cancel-all before placing fresh orders, so cancellations
/// settle on the venue and the new quotes cannot self-match.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

pub struct QuoteEngine<E: Exchange> {
    exchange: E,
    config: MakerConfig,
    state: RunState,
    volatility: VolatilityTracker,
}

impl<E: Exchange> QuoteEngine<E> {
    /// Build an engine. Fails fast on invalid configuration.
    pub fn new(exchange: E, config: MakerConfig) -> MmResult<Self> {
        config.validate()?;
        let volatility =
            VolatilityTracker::new(config.volatility.lookback, config.volatility.min_samples);
        Ok(Self {
            exchange,
            config,
            state: RunState::new(),
            volatility,
        })
    }

    pub fn config(&self) -> &MakerConfig {
        &self.config
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Run one full cycle. Never returns an error: every failure mode is
    /// folded into the returned [`CycleResult`].
    pub async fn run_cycle(&mut self) -> CycleResult {
        let timestamp = Utc::now();

        // Collateral first so the daily-loss breaker sees this cycle.
        let session_pnl = match self.exchange.total_collateral().await {
            Ok(collateral) => {
                self.state.latch_starting_collateral(collateral);
                self.state.session_pnl(collateral)
            }
            Err(e) => {
                warn!(error = %e, "collateral read failed, daily-loss check skipped this cycle");
                None
            }
        };

        // No usable mid means nothing downstream can run.
        let snapshot = match self.exchange.mid_and_spread(&self.config.symbol).await {
            Ok(s) if s.is_usable() => s,
            Ok(s) => {
                return CycleResult::aborted(
                    &self.config.symbol,
                    session_pnl,
                    format!("unusable mid price: {}", s.mid),
                );
            }
            Err(e) => {
                return CycleResult::aborted(&self.config.symbol, session_pnl, e.to_string());
            }
        };
        let mid = snapshot.mid;

        self.volatility.observe(mid.inner());
        let volatility_pct = self.volatility.volatility_pct();

        let position = match self.exchange.position(&self.config.symbol).await {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "position read failed, treating as flat");
                None
            }
        };
        let inventory_usd = position
            .as_ref()
            .map(|p| p.signed_notional(mid))
            .unwrap_or(Decimal::ZERO);

        let decision = risk::assess(
            session_pnl,
            position.as_ref(),
            volatility_pct,
            inventory_usd,
            &self.config,
        );

        let mut result = CycleResult {
            timestamp,
            symbol: self.config.symbol.clone(),
            outcome: CycleOutcome::Error,
            mid: Some(mid),
            volatility_pct,
            inventory_usd,
            session_pnl,
            quote: None,
            bid: None,
            ask: None,
            error: None,
        };

        match decision {
            RiskDecision::DailyLossHalt { .. } => {
                self.flatten().await;
                result.outcome = CycleOutcome::DailyLossLimitHit;
            }
            RiskDecision::StopLoss { pnl_pct } => {
                warn!(pnl_pct = %pnl_pct, stop = %self.config.risk.stop_loss_pct, "stop loss hit");
                self.flatten().await;
                result.outcome = CycleOutcome::StopLossTriggered;
            }
            RiskDecision::TakeProfit { pnl_pct } => {
                info!(pnl_pct = %pnl_pct, target = %self.config.risk.take_profit_pct, "take profit hit");
                self.flatten().await;
                result.outcome = CycleOutcome::TakeProfitTriggered;
            }
            RiskDecision::VolatilityPause { .. } => {
                // Stale quotes are the liability in a fast market.
                self.cancel_resting().await;
                result.outcome = CycleOutcome::VolatilityPaused;
            }
            RiskDecision::InventoryCap { .. } => {
                self.cancel_resting().await;
                result.outcome = CycleOutcome::MaxInventory;
            }
            RiskDecision::Quote(gate) => {
                self.requote(mid, inventory_usd, volatility_pct, gate, &mut result)
                    .await;
            }
        }
        result
    }

    /// Best-effort cleanup for the end of a run.
    pub async fn shutdown(&mut self) {
        info!(symbol = %self.config.symbol, "cancelling resting orders before shutdown");
        self.cancel_resting().await;
    }

    /// Cancel-then-place. Cancelling with nothing resting is a no-op
    /// success, so the first cycle takes the same path as every other.
    async fn requote(
        &mut self,
        mid: Price,
        inventory_usd: Decimal,
        volatility_pct: Decimal,
        gate: SideGate,
        result: &mut CycleResult,
    ) {
        self.cancel_resting().await;
        tokio::time::sleep(SETTLE_DELAY).await;

        // Priced off this cycle's reads, once cancellations have settled.
        let quote = quote::compute(mid, inventory_usd, volatility_pct, &self.config);
        result.quote = Some(quote);

        if self.config.flags.dry_run {
            result.outcome = CycleOutcome::DryRun;
            return;
        }

        if gate.place_bid {
            result.bid = Some(self.place_leg(OrderSide::Buy, quote.bid, quote.size).await);
        } else {
            debug!(inventory_usd = %result.inventory_usd, "bid suppressed near inventory cap");
        }
        if gate.place_ask {
            result.ask = Some(self.place_leg(OrderSide::Sell, quote.ask, quote.size).await);
        } else {
            debug!(inventory_usd = %result.inventory_usd, "ask suppressed near inventory cap");
        }

        self.state.note_quote(Utc::now());
        result.outcome = CycleOutcome::Quoted;
    }

    /// One leg, placed independently: a rejected bid never blocks the ask.
    async fn place_leg(&mut self, side: OrderSide, price: Price, size: Size) -> LegResult {
        let request = OrderRequest {
            symbol: self.config.symbol.clone(),
            side,
            price,
            size,
            post_only: self.config.execution.post_only,
        };
        match self.exchange.place_limit_order(&request).await {
            Ok(ack) => {
                self.state.track_order(ack.order_id.clone());
                LegResult::Placed(ack.order_id)
            }
            Err(e) => {
                warn!(side = %side, error = %e, "order placement failed");
                LegResult::Failed(e.to_string())
            }
        }
    }

    async fn cancel_resting(&mut self) {
        match self.exchange.cancel_all_orders(&self.config.symbol).await {
            Ok(_) => self.state.clear_orders(),
            Err(e) => {
                // Keep the tracked ids: the orders may still be resting.
                warn!(error = %e, "cancel-all failed");
            }
        }
    }

    async fn flatten(&mut self) {
        self.cancel_resting().await;
        match self.exchange.close_position(&self.config.symbol).await {
            Ok(Some(ack)) => info!(order_id = %ack.order_id, "position closed"),
            Ok(None) => debug!("no position to close"),
            Err(e) => warn!(error = %e, "position close failed"),
        }
    }
}
