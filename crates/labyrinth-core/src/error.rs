//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A request collided with state that is already blocking (a second
    /// question, a re-entered trigger). The request is dropped.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// Campaign configuration is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No trigger is registered under the given identifier.
    #[error("unknown trigger: {0}")]
    UnknownTrigger(String),

    /// No chapter exists with the given number.
    #[error("unknown chapter: {0}")]
    UnknownChapter(u32),
}
