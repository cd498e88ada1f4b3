//! Market-making quote engine.
//!
//! One engine instance quotes a single symbol: every cycle it reads the
//! market and the account, lets the risk monitor decide whether quoting is
//! allowed, computes a fresh two-sided quote, and replaces its resting
//! orders. The [`Scheduler`] drives cycles on a fixed interval and owns
//! shutdown cleanup.

pub mod config;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod quote;
pub mod risk;
pub mod scheduler;
pub mod state;
pub mod volatility;

pub use config::MakerConfig;
pub use cycle::{CycleOutcome, CycleResult, LegResult};
pub use engine::QuoteEngine;
pub use error::{MmError, MmResult};
pub use quote::Quote;
pub use risk::{RiskDecision, SideGate};
pub use scheduler::{RunBounds, RunReport, Scheduler, SchedulerState, StopReason};
pub use state::RunState;
pub use volatility::VolatilityTracker;
