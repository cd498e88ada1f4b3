//! The venue trait and order-entry types.

use crate::error::ExchangeResult;
use orderly_core::{MidSpread, OrderId, OrderSide, Position, Price, Size};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A limit order to be placed on the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub price: Price,
    pub size: Size,
    /// Maker-only: the venue must reject rather than cross the book.
    pub post_only: bool,
}

/// Acknowledgement of an accepted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: OrderId,
}

/// Everything the engine needs from a venue.
///
/// One implementation per backend; the engine is generic over this trait
/// and never constructs a client itself. All operations take `&self` so a
/// single instance can be shared.
#[allow(async_fn_in_trait)]
pub trait Exchange {
    /// Current mid price and observed spread for a symbol.
    async fn mid_and_spread(&self, symbol: &str) -> ExchangeResult<MidSpread>;

    /// Open position for a symbol, `None` when flat.
    async fn position(&self, symbol: &str) -> ExchangeResult<Option<Position>>;

    /// Total account collateral in USD.
    async fn total_collateral(&self) -> ExchangeResult<Decimal>;

    /// Cancel every resting order for a symbol.
    ///
    /// Idempotent: cancelling with no open orders succeeds.
    async fn cancel_all_orders(&self, symbol: &str) -> ExchangeResult<bool>;

    /// Place a single limit order.
    async fn place_limit_order(&self, request: &OrderRequest) -> ExchangeResult<OrderAck>;

    /// Close the open position at market, `None` when already flat.
    async fn close_position(&self, symbol: &str) -> ExchangeResult<Option<OrderAck>>;
}
