//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Weak;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically cleans up expired entries.
///
/// The first pass runs one `cleanup_interval` after spawning, then every
/// `cleanup_interval`. The task only holds a weak handle to the store and
/// exits on the first tick after the store has been dropped.
///
/// # Returns
/// A JoinHandle for the spawned task; the owning cache aborts it on drop.
pub fn spawn_cleanup_task<R>(
    runtime: &Handle,
    store: Weak<Mutex<CacheStore<R>>>,
    invalidation_timeout: Duration,
    cleanup_interval: Duration,
) -> JoinHandle<()>
where
    R: Send + Sync + 'static,
{
    runtime.spawn(async move {
        debug!(?cleanup_interval, "Starting TTL cleanup task");

        let mut ticker = time::interval_at(Instant::now() + cleanup_interval, cleanup_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let Some(live_store) = store.upgrade() else {
                debug!("Cache dropped, stopping TTL cleanup task");
                break;
            };

            let removed = live_store
                .lock()
                .cleanup_expired(Utc::now(), invalidation_timeout);
            drop(live_store);

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn shared_store() -> Arc<Mutex<CacheStore<String>>> {
        Arc::new(Mutex::new(CacheStore::new()))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let store = shared_store();
        store
            .lock()
            .insert("expire_soon".to_string(), Arc::new("value".to_string()), Utc::now());

        let handle = spawn_cleanup_task(
            &Handle::current(),
            Arc::downgrade(&store),
            Duration::from_millis(100),
            Duration::from_millis(50),
        );

        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(store.lock().is_empty(), "Expired entry should have been cleaned up");
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let store = shared_store();
        store
            .lock()
            .insert("long_lived".to_string(), Arc::new("value".to_string()), Utc::now());

        let handle = spawn_cleanup_task(
            &Handle::current(),
            Arc::downgrade(&store),
            Duration::from_secs(3600),
            Duration::from_millis(50),
        );

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(store.lock().contains_key("long_lived"), "Valid entry should not be removed");
        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_first_tick_waits_one_interval() {
        let store = shared_store();
        store
            .lock()
            .insert("key".to_string(), Arc::new("value".to_string()), Utc::now());

        let handle = spawn_cleanup_task(
            &Handle::current(),
            Arc::downgrade(&store),
            Duration::from_millis(10),
            Duration::from_secs(3600),
        );

        // Entry is expired, but no tick has fired yet
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.lock().len(), 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_exits_when_store_dropped() {
        let store = shared_store();
        let handle = spawn_cleanup_task(
            &Handle::current(),
            Arc::downgrade(&store),
            Duration::from_secs(1),
            Duration::from_millis(20),
        );

        drop(store);
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(handle.is_finished(), "Task should stop once the store is gone");
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(
            &Handle::current(),
            Arc::downgrade(&shared_store()),
            Duration::from_secs(1),
            Duration::from_secs(1),
        );

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
