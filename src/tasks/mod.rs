//! Background Tasks Module
//!
//! Contains background tasks owned by cache instances.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
