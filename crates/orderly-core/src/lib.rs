//! Core domain types for the quoting engine.
//!
//! This crate provides fundamental types used throughout the system:
//! - `Price`, `Size`: Precision-safe numeric types
//! - `MidSpread`: Market data snapshot
//! - `OrderSide`, `OrderId`: Trading enums and identifiers
//! - `Position`: Signed inventory with PnL helpers

pub mod decimal;
pub mod market;
pub mod order;
pub mod position;

pub use decimal::{Price, Size};
pub use market::MidSpread;
pub use order::{OrderId, OrderSide};
pub use position::{Position, PositionSide};
