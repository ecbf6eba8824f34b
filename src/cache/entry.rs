//! Cache Entry Module
//!
//! Pairs a shared response with the wall-clock time it was stored.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A stored response and its insertion timestamp.
#[derive(Debug)]
pub struct CacheEntry<R> {
    /// The stored response, shared with callers
    pub response: Arc<R>,
    /// Insertion timestamp (wall clock)
    pub inserted_at: DateTime<Utc>,
}

impl<R> CacheEntry<R> {
    // == Constructor ==
    /// Creates an entry stamped with the given insertion time.
    pub fn new(response: Arc<R>, inserted_at: DateTime<Utc>) -> Self {
        Self {
            response,
            inserted_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is expired at `now`.
    ///
    /// Boundary condition: an entry whose age equals the timeout is expired.
    /// A negative age (clock moved backwards) is never expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>, invalidation_timeout: Duration) -> bool {
        match (now - self.inserted_at).to_std() {
            Ok(age) => age >= invalidation_timeout,
            Err(_) => false,
        }
    }
}

// Manual impl: cloning an entry only bumps the Arc, so `R: Clone` is not needed.
impl<R> Clone for CacheEntry<R> {
    fn clone(&self) -> Self {
        Self {
            response: Arc::clone(&self.response),
            inserted_at: self.inserted_at,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn test_fresh_entry_not_expired() {
        let now = Utc::now();
        let entry = CacheEntry::new(Arc::new("preview"), now);

        assert!(!entry.is_expired_at(now, TTL));
        assert!(!entry.is_expired_at(now + chrono::Duration::seconds(59), TTL));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Utc::now();
        let entry = CacheEntry::new(Arc::new("preview"), now);

        // age == timeout counts as expired
        assert!(entry.is_expired_at(now + chrono::Duration::seconds(60), TTL));
        assert!(entry.is_expired_at(now + chrono::Duration::seconds(61), TTL));
    }

    #[test]
    fn test_backward_clock_jump_not_expired() {
        let now = Utc::now();
        let entry = CacheEntry::new(Arc::new("preview"), now);

        assert!(!entry.is_expired_at(now - chrono::Duration::hours(1), TTL));
    }

    #[test]
    fn test_clone_shares_response() {
        let entry = CacheEntry::new(Arc::new(String::from("preview")), Utc::now());
        let copy = entry.clone();

        assert!(Arc::ptr_eq(&entry.response, &copy.response));
        assert_eq!(entry.inserted_at, copy.inserted_at);
    }
}
