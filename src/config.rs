//! Configuration Module
//!
//! Holds the two construction parameters of the in-memory cache.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default entry lifetime.
pub const DEFAULT_INVALIDATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Default period of the background eviction task.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(10);

/// In-memory cache configuration.
///
/// Both values are fixed for the lifetime of a cache instance. The struct is
/// serializable so a host application can embed it in its own settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry age at or past which the entry is evicted
    pub invalidation_timeout: Duration,
    /// Period of the background eviction task
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a validated configuration.
    pub fn new(invalidation_timeout: Duration, cleanup_interval: Duration) -> Result<Self> {
        let config = Self {
            invalidation_timeout,
            cleanup_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero durations.
    ///
    /// A zero timeout would expire every entry on insertion and a zero
    /// interval cannot drive a periodic timer.
    pub fn validate(&self) -> Result<()> {
        if self.invalidation_timeout.is_zero() {
            return Err(CacheError::InvalidConfig(
                "invalidation_timeout must be non-zero".to_string(),
            ));
        }
        if self.cleanup_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cleanup_interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            invalidation_timeout: DEFAULT_INVALIDATION_TIMEOUT,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}
