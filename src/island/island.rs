//! Island type
//!
//! An island owns exactly one algorithm and one population and evolves them
//! asynchronously: `evolve` enqueues a task and returns, `wait` blocks until
//! the queue drains. Tasks of one island run strictly one at a time, in
//! submission order, because each step mutates the same population.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::IntoAlgorithm;
use crate::algorithm::Algorithm;
use crate::backend::{self, BackendKind};
use crate::error::{EvaluationError, PelagoError, PelagoResult};
use crate::island::runner::{Runner, StepRunner};
use crate::population::Population;
use crate::safety::ThreadSafety;

/// Point-in-time status of an island
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IslandStatus {
    /// Queue empty, no task running, no pending error
    Idle,
    /// At least one task queued or running
    Busy,
    /// Queue empty, a captured error awaits the next `wait`
    IdleError,
    /// Tasks queued or running and a captured error awaits the next `wait`
    BusyError,
}

impl IslandStatus {
    /// Whether tasks are queued or running
    pub fn is_busy(self) -> bool {
        matches!(self, IslandStatus::Busy | IslandStatus::BusyError)
    }
}

struct IslandState {
    algorithm: Algorithm,
    population: Population,
    queued: usize,
    running: bool,
    error: Option<PelagoError>,
}

struct IslandInner {
    state: Mutex<IslandState>,
    drained: Condvar,
    runner: Box<dyn Runner>,
    backend: BackendKind,
}

impl IslandInner {
    fn lock(&self) -> MutexGuard<'_, IslandState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owner of one algorithm and one population, evolved asynchronously
///
/// The algorithm and population are exclusively owned: no other island can
/// reach them, which is why the population needs no internal locking. The
/// execution backend is chosen once, at construction, from the combined
/// thread safety of the algorithm and the population's problem.
pub struct Island {
    inner: Arc<IslandInner>,
}

impl Island {
    /// Create an island from an algorithm and a population
    pub fn new(algo: impl IntoAlgorithm, pop: Population) -> Self {
        Self::with_boxed_runner(Box::new(StepRunner), algo.into_algorithm(), pop)
    }

    /// Create an island with a custom execution strategy
    pub fn with_runner(runner: impl Runner, algo: impl IntoAlgorithm, pop: Population) -> Self {
        Self::with_boxed_runner(Box::new(runner), algo.into_algorithm(), pop)
    }

    pub(crate) fn with_boxed_runner(
        runner: Box<dyn Runner>,
        algorithm: Algorithm,
        population: Population,
    ) -> Self {
        let effective = algorithm
            .thread_safety()
            .combine(population.problem().thread_safety());
        let backend = match effective {
            ThreadSafety::Basic => BackendKind::Shared,
            ThreadSafety::None => BackendKind::Isolated,
        };
        Self {
            inner: Arc::new(IslandInner {
                state: Mutex::new(IslandState {
                    algorithm,
                    population,
                    queued: 0,
                    running: false,
                    error: None,
                }),
                drained: Condvar::new(),
                runner,
                backend,
            }),
        }
    }

    /// The backend this island submits its tasks to
    pub fn backend(&self) -> BackendKind {
        self.inner.backend
    }

    /// Enqueue one evolution task; never blocks
    ///
    /// Tasks execute strictly in submission order, never concurrently with
    /// each other. Repeated calls while busy simply lengthen the queue.
    pub fn evolve(&self) {
        let mut state = self.inner.lock();
        state.queued += 1;
        if !state.running {
            state.queued -= 1;
            state.running = true;
            let inner = Arc::clone(&self.inner);
            if let Err(e) = backend::submit(self.inner.backend, Box::new(move || run_task(inner)))
            {
                state.running = false;
                state.queued = 0;
                state.error = Some(e.into());
            }
        }
    }

    /// Block until the queue is empty and no task is running
    ///
    /// Re-raises a captured task error and clears it; afterwards the island
    /// is idle and ready for further `evolve` calls.
    pub fn wait(&self) -> PelagoResult<()> {
        let mut state = self.inner.lock();
        while state.running || state.queued > 0 {
            state = self
                .inner
                .drained
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Point-in-time status, safe to call while a task is in flight
    pub fn status(&self) -> IslandStatus {
        let state = self.inner.lock();
        match (state.running || state.queued > 0, state.error.is_some()) {
            (false, false) => IslandStatus::Idle,
            (true, false) => IslandStatus::Busy,
            (false, true) => IslandStatus::IdleError,
            (true, true) => IslandStatus::BusyError,
        }
    }

    /// Snapshot of the current population, safe to call while a task is in flight
    pub fn population(&self) -> Population {
        self.inner.lock().population.clone()
    }

    /// Snapshot of the algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.inner.lock().algorithm.clone()
    }
}

impl fmt::Debug for Island {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Island")
            .field("status", &self.status())
            .field("backend", &self.inner.backend)
            .field("runner", &self.inner.runner.name())
            .finish()
    }
}

/// One queued evolution task, executed on a backend worker
fn run_task(inner: Arc<IslandInner>) {
    let (algorithm, population) = {
        let state = inner.lock();
        (state.algorithm.clone(), state.population.clone())
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        inner.runner.run_evolve(&algorithm, population)
    }));
    let result = match outcome {
        Ok(result) => result,
        Err(payload) => Err(EvaluationError::Panicked(panic_message(payload.as_ref())).into()),
    };

    let mut state = inner.lock();
    match result {
        Ok(new_population) => {
            state.population = new_population;
            state.error = None;
            if state.queued > 0 {
                state.queued -= 1;
                let next = Arc::clone(&inner);
                if let Err(e) =
                    backend::submit(inner.backend, Box::new(move || run_task(next)))
                {
                    state.queued = 0;
                    state.running = false;
                    state.error = Some(e.into());
                    inner.drained.notify_all();
                }
            } else {
                state.running = false;
                inner.drained.notify_all();
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "island task failed; discarding queued tasks");
            // Queued tasks are discarded rather than run against a
            // population the failed step may have intended to replace.
            state.error = Some(e);
            state.queued = 0;
            state.running = false;
            inner.drained.notify_all();
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
