//! Per-session mutable engine state.

use chrono::{DateTime, Utc};
use orderly_core::OrderId;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Everything the engine mutates across cycles.
///
/// Reset by constructing a fresh engine; nothing here survives a restart.
#[derive(Debug, Clone)]
pub struct RunState {
    pub session_start: DateTime<Utc>,
    starting_collateral: Option<Decimal>,
    pub last_quote_time: Option<DateTime<Utc>>,
    active_order_ids: HashSet<OrderId>,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            session_start: Utc::now(),
            starting_collateral: None,
            last_quote_time: None,
            active_order_ids: HashSet::new(),
        }
    }

    /// Record the session's collateral baseline. Only the first successful
    /// read counts; later reads never move the baseline.
    pub fn latch_starting_collateral(&mut self, collateral: Decimal) {
        if self.starting_collateral.is_none() {
            self.starting_collateral = Some(collateral);
        }
    }

    pub fn starting_collateral(&self) -> Option<Decimal> {
        self.starting_collateral
    }

    /// Session PnL relative to the baseline; `None` until latched.
    pub fn session_pnl(&self, current_collateral: Decimal) -> Option<Decimal> {
        self.starting_collateral.map(|s| current_collateral - s)
    }

    pub fn note_quote(&mut self, at: DateTime<Utc>) {
        self.last_quote_time = Some(at);
    }

    pub fn track_order(&mut self, id: OrderId) {
        self.active_order_ids.insert(id);
    }

    /// Forget tracked orders after a confirmed cancel-all.
    pub fn clear_orders(&mut self) {
        self.active_order_ids.clear();
    }

    pub fn active_orders(&self) -> &HashSet<OrderId> {
        &self.active_order_ids
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_baseline_latches_once() {
        let mut state = RunState::new();
        assert_eq!(state.session_pnl(dec!(1000)), None);

        state.latch_starting_collateral(dec!(1000));
        state.latch_starting_collateral(dec!(900));
        assert_eq!(state.starting_collateral(), Some(dec!(1000)));
        assert_eq!(state.session_pnl(dec!(965)), Some(dec!(-35)));
    }

    #[test]
    fn test_order_tracking() {
        let mut state = RunState::new();
        state.track_order(OrderId::new("a"));
        state.track_order(OrderId::new("b"));
        state.track_order(OrderId::new("a"));
        assert_eq!(state.active_orders().len(), 2);

        state.clear_orders();
        assert!(state.active_orders().is_empty());
    }
}
