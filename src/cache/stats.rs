//! Cache Statistics Module
//!
//! Tracks lookups and the two eviction paths (lazy and background).

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a stored response
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Expired entries removed on the lookup path
    pub lazy_evictions: u64,
    /// Expired entries removed by cleanup passes
    pub cleanup_evictions: u64,
    /// Current number of stored entries
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_lazy_eviction(&mut self) {
        self.lazy_evictions += 1;
    }

    pub fn record_cleanup_evictions(&mut self, count: usize) {
        self.cleanup_evictions += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
