//! Venue error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Transport-level failure: timeout, connection refused, 5xx.
    #[error("transport error: {0}")]
    Transport(String),

    /// The venue refused the request (insufficient margin, bad symbol, ...).
    #[error("order rejected: {0}")]
    Rejected(String),

    /// The venue answered but the payload could not be interpreted.
    #[error("malformed venue response: {0}")]
    Malformed(String),
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;
