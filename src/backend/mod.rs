//! Execution backends
//!
//! Evolution tasks run on one of two process-wide pools: a shared in-process
//! thread pool for plugins declaring basic thread safety, and an isolated
//! pool that gives every task a dedicated worker for plugins that declare
//! none. Both pools are created lazily on first submission and torn down
//! idempotently; a submission after shutdown starts a fresh pool.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::PoolError;

pub mod isolated;
pub mod shared;

/// A unit of work executed by a backend worker
pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

/// Which pool an island submits its tasks to
///
/// Fixed at island construction from the combined thread safety of its
/// algorithm and problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    /// Shared in-process worker pool
    Shared,
    /// Isolated-worker pool, one dedicated worker per task
    Isolated,
}

/// Sizing configuration applied when a pool is (re)created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Worker count; `None` sizes to available hardware concurrency
    pub workers: Option<usize>,
}

impl PoolConfig {
    pub(crate) fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }
}

static CONFIG: Mutex<PoolConfig> = Mutex::new(PoolConfig { workers: None });

/// Set the configuration used the next time a pool is created
///
/// Pools already running keep their current size until shut down.
pub fn configure(config: PoolConfig) {
    *lock_unpoisoned(&CONFIG) = config;
}

pub(crate) fn current_config() -> PoolConfig {
    lock_unpoisoned(&CONFIG).clone()
}

/// Submit a task to the pool of the given kind, creating it if needed
pub(crate) fn submit(kind: BackendKind, task: Task) -> Result<(), PoolError> {
    match kind {
        BackendKind::Shared => shared::submit(task),
        BackendKind::Isolated => isolated::submit(task),
    }
}

/// Tear down both pools, the isolated one first
///
/// In-flight tasks finish before their workers exit. Safe to call any number
/// of times, including from a process exit path.
pub fn shutdown_backends() {
    isolated::shutdown();
    shared::shutdown();
}

pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub mod prelude {
    pub use super::{configure, shutdown_backends, BackendKind, PoolConfig};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_config_worker_count() {
        assert_eq!(PoolConfig { workers: Some(3) }.worker_count(), 3);
        assert!(PoolConfig::default().worker_count() >= 1);
    }

    #[test]
    fn test_shutdown_backends_is_idempotent() {
        shutdown_backends();
        shutdown_backends();
    }
}
