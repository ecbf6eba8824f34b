//! Link Preview Cache - response cache for a link-preview client
//!
//! Maps a request identity (URL plus crawl options) to a previously computed
//! preview response for a bounded time. Two implementations of the [`Cache`]
//! contract are provided: [`DisabledCache`], which stores nothing, and
//! [`InMemoryCache`], which expires entries after a fixed timeout and sweeps
//! them with a background task.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{cache_key, Cache, CacheStats, CrawlOptions, DisabledCache, InMemoryCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
