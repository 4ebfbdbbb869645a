//! Island execution strategy
//!
//! The runner decides what one evolution task does once a backend worker
//! picks it up. The default simply applies the algorithm to the population.

use crate::algorithm::Algorithm;
use crate::error::PelagoResult;
use crate::population::Population;

/// Strategy executed by a backend worker for one queued task
pub trait Runner: Send + Sync + 'static {
    /// Run one evolution step
    fn run_evolve(&self, algo: &Algorithm, pop: Population) -> PelagoResult<Population>;

    /// Human-readable runner name
    fn name(&self) -> String {
        "step runner".to_string()
    }

    /// Deep copy of this runner
    fn clone_runner(&self) -> Box<dyn Runner>;
}

/// Default runner: one plain algorithm step
#[derive(Clone, Copy, Debug, Default)]
pub struct StepRunner;

impl Runner for StepRunner {
    fn run_evolve(&self, algo: &Algorithm, pop: Population) -> PelagoResult<Population> {
        algo.evolve(pop)
    }

    fn clone_runner(&self) -> Box<dyn Runner> {
        Box::new(*self)
    }
}
