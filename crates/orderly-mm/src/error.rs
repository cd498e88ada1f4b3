//! Engine error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MmError {
    /// A configuration invariant is violated. Fatal at startup; the engine
    /// never coerces bad config into something runnable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type MmResult<T> = Result<T, MmError>;
