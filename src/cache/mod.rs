//! Cache Module
//!
//! The response cache contract and its two implementations: a disabled
//! no-op singleton and a time-bounded in-memory store.

mod disabled;
mod entry;
mod memory;
mod options;
mod stats;
mod store;


use std::sync::Arc;

// Re-export public types
pub use disabled::DisabledCache;
pub use entry::CacheEntry;
pub use memory::InMemoryCache;
pub use options::CrawlOptions;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Token between the URL and the options text in a cache key.
pub const KEY_OPTIONS_SEPARATOR: &str = " options:";

// == Cache Key ==
/// Builds the composite key for a request identity.
///
/// The URL is used as given; canonicalizing it is the caller's job.
pub fn cache_key(url: &str, options: CrawlOptions) -> String {
    format!("{url}{KEY_OPTIONS_SEPARATOR}{options}")
}

// == Cache Contract ==
/// A store of preview responses keyed by URL and crawl options.
///
/// Both operations are total: implementations contain their own failures.
pub trait Cache<R>: Send + Sync {
    /// Returns the stored response for this request identity if one exists
    /// and has not expired.
    fn get(&self, url: &str, options: CrawlOptions) -> Option<Arc<R>>;

    /// Stores `response`, replacing any prior entry and restarting its
    /// lifetime. `None` removes the entry.
    fn put(&self, url: &str, options: CrawlOptions, response: Option<Arc<R>>);
}

impl<R, C: Cache<R> + ?Sized> Cache<R> for &C {
    fn get(&self, url: &str, options: CrawlOptions) -> Option<Arc<R>> {
        (**self).get(url, options)
    }

    fn put(&self, url: &str, options: CrawlOptions, response: Option<Arc<R>>) {
        (**self).put(url, options, response)
    }
}

impl<R, C: Cache<R> + ?Sized> Cache<R> for Arc<C> {
    fn get(&self, url: &str, options: CrawlOptions) -> Option<Arc<R>> {
        (**self).get(url, options)
    }

    fn put(&self, url: &str, options: CrawlOptions, response: Option<Arc<R>>) {
        (**self).put(url, options, response)
    }
}
