//! Isolated-worker pool
//!
//! Runs every task on a freshly spawned, dedicated OS thread, so a worker
//! context never executes more than one plugin. Required whenever a task
//! touches a plugin with no declared thread safety, since such plugins may
//! hold non-reentrant or mutable global state. Concurrency is bounded by a
//! permit counter sized to available hardware concurrency.

use std::sync::{Arc, Condvar, Mutex};
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::backend::{current_config, lock_unpoisoned, Task};
use crate::error::PoolError;

static ISOLATED: Mutex<Option<IsolatedPool>> = Mutex::new(None);

struct IsolatedPool {
    tx: Sender<Task>,
    dispatcher: thread::JoinHandle<()>,
}

impl IsolatedPool {
    fn start() -> Result<Self, PoolError> {
        let workers = current_config().worker_count();
        let (tx, rx) = crossbeam_channel::unbounded::<Task>();
        let permits = Arc::new(Permits::new(workers));
        let dispatcher = thread::Builder::new()
            .name("pelago-isolated-dispatch".to_string())
            .spawn(move || dispatcher_loop(rx, permits))
            .map_err(|e| PoolError::Unavailable(format!("cannot start dispatcher: {e}")))?;
        tracing::debug!(workers, "isolated pool started");
        Ok(Self { tx, dispatcher })
    }
}

/// Submit a task, creating the pool on first use
pub(crate) fn submit(task: Task) -> Result<(), PoolError> {
    let mut guard = lock_unpoisoned(&ISOLATED);
    if guard.is_none() {
        *guard = Some(IsolatedPool::start()?);
    }
    let pool = guard.as_ref().expect("pool initialized above");
    match pool.tx.send(task) {
        Ok(()) => Ok(()),
        Err(send_err) => {
            // The dispatcher died; replace the pool and retry once.
            let fresh = IsolatedPool::start()?;
            let result = fresh
                .tx
                .send(send_err.0)
                .map_err(|_| PoolError::WorkerLost("dispatcher unavailable".to_string()));
            *guard = Some(fresh);
            result
        }
    }
}

/// Tear the pool down, joining the dispatcher and its workers
///
/// Already-queued tasks still run before the dispatcher exits. Idempotent;
/// a later submission starts a fresh pool.
pub fn shutdown() {
    let pool = lock_unpoisoned(&ISOLATED).take();
    if let Some(IsolatedPool { tx, dispatcher }) = pool {
        tracing::debug!("isolated pool shutting down");
        // Closing the channel stops new work; the dispatcher drains what is
        // already queued, joins its workers, then exits.
        drop(tx);
        let _ = dispatcher.join();
    }
}

fn dispatcher_loop(rx: Receiver<Task>, permits: Arc<Permits>) {
    let mut workers: Vec<thread::JoinHandle<()>> = Vec::new();
    for task in rx.iter() {
        permits.acquire();
        workers.retain(|h| !h.is_finished());

        // Hand the task over through a slot so it can still run here if the
        // spawn itself fails; losing it would strand the owning island.
        let slot = Arc::new(Mutex::new(Some(task)));
        let worker_slot = Arc::clone(&slot);
        let worker_permits = Arc::clone(&permits);
        let spawned = thread::Builder::new()
            .name("pelago-isolated".to_string())
            .spawn(move || {
                if let Some(task) = lock_unpoisoned(&worker_slot).take() {
                    task();
                }
                worker_permits.release();
            });
        match spawned {
            Ok(handle) => workers.push(handle),
            Err(err) => {
                tracing::warn!(%err, "isolated worker spawn failed; running inline");
                if let Some(task) = lock_unpoisoned(&slot).take() {
                    task();
                }
                permits.release();
            }
        }
    }
    for handle in workers {
        let _ = handle.join();
    }
}

/// Counting semaphore bounding concurrent isolated workers
struct Permits {
    available: Mutex<usize>,
    freed: Condvar,
}

impl Permits {
    fn new(count: usize) -> Self {
        Self {
            available: Mutex::new(count.max(1)),
            freed: Condvar::new(),
        }
    }

    fn acquire(&self) {
        let mut n = lock_unpoisoned(&self.available);
        while *n == 0 {
            n = self
                .freed
                .wait(n)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
        *n -= 1;
    }

    fn release(&self) {
        let mut n = lock_unpoisoned(&self.available);
        *n += 1;
        self.freed.notify_one();
    }
}
