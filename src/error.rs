//! Error types for the response cache
//!
//! Provides unified error handling using thiserror. None of these errors
//! ever reach `get`/`put` callers; they surface only at construction.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the response cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Rejected construction parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No tokio runtime available to host the cleanup task
    #[error("Runtime unavailable: {0}")]
    RuntimeUnavailable(String),
}

// == Result Type Alias ==
/// Convenience Result type for the response cache.
pub type Result<T> = std::result::Result<T, CacheError>;
