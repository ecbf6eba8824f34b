//! In-Memory Cache
//!
//! Time-bounded response cache: a mutex-guarded store plus a background
//! cleanup task bound to the cache's lifetime.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, Cache, CacheStats, CacheStore, CrawlOptions};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_cleanup_task;

// == In-Memory Cache ==
/// Response cache that forgets entries after a fixed invalidation timeout.
///
/// Every access to the store goes through one mutex: `get`, `put`, and the
/// cleanup task all take it. `get` checks expiry itself, so results stay
/// correct even when no cleanup task could be scheduled.
///
/// The cleanup task runs on the runtime given to
/// [`InMemoryCache::with_runtime`], on the current runtime when built from
/// inside one, and otherwise on a shared background runtime owned by this
/// crate. Dropping the cache aborts it.
#[derive(Debug)]
pub struct InMemoryCache<R> {
    store: Arc<Mutex<CacheStore<R>>>,
    config: CacheConfig,
    cleanup_task: Option<JoinHandle<()>>,
}

impl<R> InMemoryCache<R>
where
    R: Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache and starts its cleanup task.
    ///
    /// The task runs on the current tokio runtime, or on the shared cleanup
    /// runtime when called from a plain thread. If neither can be had the
    /// cache still works but relies on lookup-time expiry alone.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, cleanup_runtime()))
    }

    /// Creates a cache from the two timeouts, see [`InMemoryCache::new`].
    pub fn with_timeouts(
        invalidation_timeout: Duration,
        cleanup_interval: Duration,
    ) -> Result<Self> {
        Self::new(CacheConfig::new(invalidation_timeout, cleanup_interval)?)
    }

    /// Creates a cache whose cleanup task runs on `runtime`.
    pub fn with_runtime(config: CacheConfig, runtime: &Handle) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, Ok(runtime.clone())))
    }

    fn build(config: CacheConfig, runtime: Result<Handle>) -> Self {
        let store = Arc::new(Mutex::new(CacheStore::new()));

        let cleanup_task = match runtime {
            Ok(handle) => Some(spawn_cleanup_task(
                &handle,
                Arc::downgrade(&store),
                config.invalidation_timeout,
                config.cleanup_interval,
            )),
            Err(err) => {
                warn!(
                    error = %err,
                    "TTL cleanup task not scheduled, relying on lookup-time expiry"
                );
                None
            }
        };

        info!(
            "In-memory cache initialized: invalidation_timeout={:?}, cleanup_interval={:?}",
            config.invalidation_timeout, config.cleanup_interval
        );

        Self {
            store,
            config,
            cleanup_task,
        }
    }

    // == Cleanup Expired ==
    /// Runs one cleanup pass now and returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        self.store
            .lock()
            .cleanup_expired(Utc::now(), self.config.invalidation_timeout)
    }

    // == Introspection ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Whether a background cleanup task was scheduled for this cache.
    pub fn has_cleanup_task(&self) -> bool {
        self.cleanup_task.is_some()
    }
}

impl<R> Cache<R> for InMemoryCache<R>
where
    R: Send + Sync + 'static,
{
    fn get(&self, url: &str, options: CrawlOptions) -> Option<Arc<R>> {
        let key = cache_key(url, options);
        let now = Utc::now();
        let (had_entry, found) = {
            let mut store = self.store.lock();
            let had_entry = store.contains_key(&key);
            (had_entry, store.get(&key, now, self.config.invalidation_timeout))
        };

        if had_entry && found.is_none() {
            debug!(key = %key, "Evicted expired entry on lookup");
        }
        found
    }

    fn put(&self, url: &str, options: CrawlOptions, response: Option<Arc<R>>) {
        let key = cache_key(url, options);
        let now = Utc::now();
        let mut store = self.store.lock();

        match response {
            Some(response) => store.insert(key, response, now),
            None => {
                store.remove(&key);
            }
        }
    }
}

impl<R> Default for InMemoryCache<R>
where
    R: Send + Sync + 'static,
{
    /// 300 s invalidation timeout, 10 s cleanup interval.
    fn default() -> Self {
        Self::build(CacheConfig::default(), cleanup_runtime())
    }
}

impl<R> Drop for InMemoryCache<R> {
    fn drop(&mut self) {
        if let Some(task) = self.cleanup_task.take() {
            task.abort();
            debug!("TTL cleanup task aborted");
        }
    }
}

// == Cleanup Runtime ==
/// Runtime hosting cleanup tasks of caches built outside any tokio runtime.
static CLEANUP_RUNTIME: OnceCell<Runtime> = OnceCell::new();

/// Picks the runtime for a new cleanup task: the current one if any, else the
/// shared single-worker runtime, built on first use.
fn cleanup_runtime() -> Result<Handle> {
    if let Ok(handle) = Handle::try_current() {
        return Ok(handle);
    }

    CLEANUP_RUNTIME
        .get_or_try_init(|| {
            debug!("Starting shared TTL cleanup runtime");
            Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("link-preview-cache-cleanup")
                .enable_time()
                .build()
                .map_err(|err| CacheError::RuntimeUnavailable(err.to_string()))
        })
        .map(|runtime| runtime.handle().clone())
}
