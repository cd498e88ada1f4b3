//! Bot application: configuration loading and logging setup.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, RunConfig, SimConfig};
pub use error::{AppError, AppResult};
pub use logging::init_logging;
