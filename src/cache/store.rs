//! Cache Store Module
//!
//! Unsynchronized key -> entry map with expiry-aware lookup and cleanup.
//! Callers serialize access; `InMemoryCache` wraps it in a mutex.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Response storage keyed by composite cache key.
#[derive(Debug)]
pub struct CacheStore<R> {
    /// Key -> entry storage
    entries: HashMap<String, CacheEntry<R>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<R> CacheStore<R> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Looks up a key at time `now`.
    ///
    /// An expired entry is removed in place and reported as a miss.
    pub fn get(&mut self, key: &str, now: DateTime<Utc>, ttl: Duration) -> Option<Arc<R>> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now, ttl),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_lazy_eviction();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        self.stats.record_hit();
        self.entries
            .get(key)
            .map(|entry| Arc::clone(&entry.response))
    }

    // == Insert ==
    /// Stores a response, replacing any prior entry and its timestamp.
    pub fn insert(&mut self, key: String, response: Arc<R>, now: DateTime<Utc>) {
        self.entries.insert(key, CacheEntry::new(response, now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Removes a key. Returns true if an entry was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Cleanup Expired ==
    /// Removes every entry expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now, ttl));

        let removed = before - self.entries.len();
        self.stats.record_cleanup_evictions(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl<R> Default for CacheStore<R> {
    fn default() -> Self {
        Self::new()
    }
}
