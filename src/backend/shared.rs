//! Shared in-process worker pool
//!
//! A rayon thread pool sized to available hardware concurrency. Safe only
//! for plugins declaring basic thread safety, since its workers share memory
//! with the caller and with each other.

use std::sync::Mutex;

use crate::backend::{current_config, lock_unpoisoned, Task};
use crate::error::PoolError;

static SHARED: Mutex<Option<rayon::ThreadPool>> = Mutex::new(None);

/// Submit a task, creating the pool on first use
pub(crate) fn submit(task: Task) -> Result<(), PoolError> {
    let mut guard = lock_unpoisoned(&SHARED);
    if guard.is_none() {
        let workers = current_config().worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pelago-shared-{i}"))
            .build()
            .map_err(|e| PoolError::Unavailable(e.to_string()))?;
        tracing::debug!(workers, "shared pool started");
        *guard = Some(pool);
    }
    let pool = guard.as_ref().expect("pool initialized above");
    pool.spawn(task);
    Ok(())
}

/// Tear the pool down, waiting for in-flight tasks
///
/// Idempotent; a later submission starts a fresh pool.
pub fn shutdown() {
    let pool = lock_unpoisoned(&SHARED).take();
    if let Some(pool) = pool {
        tracing::debug!("shared pool shutting down");
        // Dropping the pool outside the lock lets draining tasks resubmit
        // without deadlocking against a fresh pool.
        drop(pool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_submit_runs_task() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        submit(Box::new(move || {
            let _ = tx.send(());
        }))
        .unwrap();
        rx.recv_timeout(Duration::from_secs(10)).unwrap();
    }

    #[test]
    fn test_shutdown_twice_is_idempotent() {
        shutdown();
        shutdown();
    }

    #[test]
    fn test_pool_restarts_after_shutdown() {
        shutdown();
        let (tx, rx) = crossbeam_channel::bounded(1);
        submit(Box::new(move || {
            let _ = tx.send(());
        }))
        .unwrap();
        rx.recv_timeout(Duration::from_secs(10)).unwrap();
    }
}
