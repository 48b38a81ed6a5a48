//! Labyrinth — driver error types.

use labyrinth_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the headless driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The campaign could not be loaded or started.
    #[error("campaign error: {0}")]
    Campaign(#[from] DomainError),

    /// Reading input failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
