//! In-memory venue for paper trading and tests.
//!
//! `SimExchange` keeps the whole venue state behind one mutex: mid price,
//! spread, collateral, position and the resting order book for a single
//! account. Handles are cheap clones sharing the same state, so a test can
//! steer the market while the engine trades against it.
//!
//! Fault injection is one-shot: each `fail_next_*` arms exactly one
//! failure, consumed by the next matching call.

use crate::api::{Exchange, OrderAck, OrderRequest};
use crate::error::{ExchangeError, ExchangeResult};
use orderly_core::{MidSpread, OrderId, OrderSide, Position, PositionSide, Price, Size};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct SimOrder {
    id: OrderId,
    side: OrderSide,
    price: Price,
    size: Size,
}

#[derive(Debug, Default)]
struct Faults {
    market_data: bool,
    position: bool,
    collateral: bool,
    cancel: bool,
    place: Option<OrderSide>,
}

#[derive(Debug)]
struct SimState {
    mid: Decimal,
    spread_bps: Decimal,
    collateral: Decimal,
    position: Option<Position>,
    open_orders: Vec<SimOrder>,
    next_order_seq: u64,
    cancel_calls: u64,
    faults: Faults,
}

/// Simulated venue backend.
#[derive(Clone)]
pub struct SimExchange {
    inner: Arc<Mutex<SimState>>,
}

impl SimExchange {
    pub fn new(mid: Decimal, spread_bps: Decimal, collateral: Decimal) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SimState {
                mid,
                spread_bps,
                collateral,
                position: None,
                open_orders: Vec::new(),
                next_order_seq: 1,
                cancel_calls: 0,
                faults: Faults::default(),
            })),
        }
    }

    // -- steering ---------------------------------------------------------

    pub fn set_mid(&self, mid: Decimal) {
        self.inner.lock().mid = mid;
    }

    pub fn set_collateral(&self, collateral: Decimal) {
        self.inner.lock().collateral = collateral;
    }

    pub fn set_position(
        &self,
        side: PositionSide,
        size: Decimal,
        entry_price: Decimal,
        unrealized_pnl: Decimal,
    ) {
        let mut state = self.inner.lock();
        let mark = state.mid;
        state.position = Some(Position {
            side,
            size: Size::new(size),
            entry_price: Price::new(entry_price),
            mark_price: Price::new(mark),
            unrealized_pnl,
        });
    }

    pub fn clear_position(&self) {
        self.inner.lock().position = None;
    }

    // -- fault injection (one-shot) ---------------------------------------

    pub fn fail_next_market_data(&self) {
        self.inner.lock().faults.market_data = true;
    }

    pub fn fail_next_position(&self) {
        self.inner.lock().faults.position = true;
    }

    pub fn fail_next_collateral(&self) {
        self.inner.lock().faults.collateral = true;
    }

    pub fn fail_next_cancel(&self) {
        self.inner.lock().faults.cancel = true;
    }

    pub fn fail_next_place(&self, side: OrderSide) {
        self.inner.lock().faults.place = Some(side);
    }

    // -- inspection -------------------------------------------------------

    pub fn open_order_count(&self) -> usize {
        self.inner.lock().open_orders.len()
    }

    pub fn open_order_sides(&self) -> Vec<OrderSide> {
        self.inner.lock().open_orders.iter().map(|o| o.side).collect()
    }

    pub fn open_order_ids(&self) -> Vec<OrderId> {
        self.inner.lock().open_orders.iter().map(|o| o.id.clone()).collect()
    }

    pub fn open_order_prices(&self) -> Vec<(OrderSide, Decimal, Decimal)> {
        self.inner
            .lock()
            .open_orders
            .iter()
            .map(|o| (o.side, o.price.inner(), o.size.inner()))
            .collect()
    }

    pub fn cancel_calls(&self) -> u64 {
        self.inner.lock().cancel_calls
    }

    pub fn has_position(&self) -> bool {
        self.inner.lock().position.is_some()
    }
}

impl Exchange for SimExchange {
    async fn mid_and_spread(&self, _symbol: &str) -> ExchangeResult<MidSpread> {
        let mut state = self.inner.lock();
        if std::mem::take(&mut state.faults.market_data) {
            return Err(ExchangeError::Transport("market data unavailable".into()));
        }
        Ok(MidSpread::new(Price::new(state.mid), state.spread_bps))
    }

    async fn position(&self, _symbol: &str) -> ExchangeResult<Option<Position>> {
        let mut state = self.inner.lock();
        if std::mem::take(&mut state.faults.position) {
            return Err(ExchangeError::Transport("position read failed".into()));
        }
        Ok(state.position)
    }

    async fn total_collateral(&self) -> ExchangeResult<Decimal> {
        let mut state = self.inner.lock();
        if std::mem::take(&mut state.faults.collateral) {
            return Err(ExchangeError::Transport("collateral read failed".into()));
        }
        Ok(state.collateral)
    }

    async fn cancel_all_orders(&self, _symbol: &str) -> ExchangeResult<bool> {
        let mut state = self.inner.lock();
        state.cancel_calls += 1;
        if std::mem::take(&mut state.faults.cancel) {
            return Err(ExchangeError::Transport("cancel failed".into()));
        }
        // No resting orders is still a successful cancel.
        state.open_orders.clear();
        Ok(true)
    }

    async fn place_limit_order(&self, request: &OrderRequest) -> ExchangeResult<OrderAck> {
        let mut state = self.inner.lock();
        if state.faults.place == Some(request.side) {
            state.faults.place = None;
            return Err(ExchangeError::Rejected(format!(
                "{} leg rejected",
                request.side
            )));
        }
        let id = OrderId::new(format!("sim-{}", state.next_order_seq));
        state.next_order_seq += 1;
        state.open_orders.push(SimOrder {
            id: id.clone(),
            side: request.side,
            price: request.price,
            size: request.size,
        });
        Ok(OrderAck { order_id: id })
    }

    async fn close_position(&self, _symbol: &str) -> ExchangeResult<Option<OrderAck>> {
        let mut state = self.inner.lock();
        if state.position.take().is_none() {
            return Ok(None);
        }
        let id = OrderId::new(format!("sim-close-{}", state.next_order_seq));
        state.next_order_seq += 1;
        Ok(Some(OrderAck { order_id: id }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sim() -> SimExchange {
        SimExchange::new(dec!(2000), dec!(4), dec!(1000))
    }

    #[tokio::test]
    async fn test_cancel_all_idempotent() {
        let ex = sim();
        assert!(ex.cancel_all_orders("ETH-PERP").await.unwrap());
        assert!(ex.cancel_all_orders("ETH-PERP").await.unwrap());
        assert_eq!(ex.cancel_calls(), 2);
    }

    #[tokio::test]
    async fn test_place_and_cancel() {
        let ex = sim();
        let ack = ex
            .place_limit_order(&OrderRequest {
                symbol: "ETH-PERP".into(),
                side: OrderSide::Buy,
                price: Price::new(dec!(1997)),
                size: Size::ONE,
                post_only: true,
            })
            .await
            .unwrap();
        assert_eq!(ack.order_id.as_str(), "sim-1");
        assert_eq!(ex.open_order_count(), 1);

        ex.cancel_all_orders("ETH-PERP").await.unwrap();
        assert_eq!(ex.open_order_count(), 0);
    }

    #[tokio::test]
    async fn test_one_shot_fault() {
        let ex = sim();
        ex.fail_next_market_data();
        assert!(ex.mid_and_spread("ETH-PERP").await.is_err());
        assert!(ex.mid_and_spread("ETH-PERP").await.is_ok());
    }

    #[tokio::test]
    async fn test_close_position_when_flat() {
        let ex = sim();
        assert!(ex.close_position("ETH-PERP").await.unwrap().is_none());

        ex.set_position(PositionSide::Long, dec!(1), dec!(2000), dec!(0));
        assert!(ex.close_position("ETH-PERP").await.unwrap().is_some());
        assert!(!ex.has_position());
    }

    #[tokio::test]
    async fn test_side_targeted_place_fault() {
        let ex = sim();
        ex.fail_next_place(OrderSide::Buy);

        let bid = OrderRequest {
            symbol: "ETH-PERP".into(),
            side: OrderSide::Buy,
            price: Price::new(dec!(1997)),
            size: Size::ONE,
            post_only: true,
        };
        let ask = OrderRequest {
            side: OrderSide::Sell,
            price: Price::new(dec!(2003)),
            ..bid.clone()
        };

        assert!(ex.place_limit_order(&bid).await.is_err());
        assert!(ex.place_limit_order(&ask).await.is_ok());
        assert_eq!(ex.open_order_sides(), vec![OrderSide::Sell]);
    }
}
