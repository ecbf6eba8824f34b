//! Disabled Cache
//!
//! A cache that stores nothing, so clients can hold a non-optional cache and
//! pick behavior by injection.

use std::sync::Arc;

use crate::cache::{Cache, CrawlOptions};

static INSTANCE: DisabledCache = DisabledCache;

/// Cache whose `get` always misses and whose `put` is discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisabledCache;

impl DisabledCache {
    /// Returns the process-wide instance.
    pub fn instance() -> &'static DisabledCache {
        &INSTANCE
    }
}

impl<R> Cache<R> for DisabledCache {
    fn get(&self, _url: &str, _options: CrawlOptions) -> Option<Arc<R>> {
        None
    }

    fn put(&self, _url: &str, _options: CrawlOptions, _response: Option<Arc<R>>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get_misses() {
        let cache = DisabledCache::instance();
        let opts = CrawlOptions::from_bits(3);

        cache.put("https://a", opts, Some(Arc::new(42u32)));
        let found: Option<Arc<u32>> = cache.get("https://a", opts);
        assert!(found.is_none());
    }

    #[test]
    fn test_instance_is_singleton() {
        assert!(std::ptr::eq(DisabledCache::instance(), DisabledCache::instance()));
    }
}
