//! Venue abstraction for the quoting engine.
//!
//! The engine talks to a venue exclusively through the [`Exchange`] trait:
//! market data, account reads, and order entry. A production transport
//! implements the trait against the venue's REST API; [`SimExchange`]
//! implements it in memory for paper trading and tests.

pub mod api;
pub mod error;
pub mod sim;

pub use api::{Exchange, OrderAck, OrderRequest};
pub use error::{ExchangeError, ExchangeResult};
pub use sim::SimExchange;
