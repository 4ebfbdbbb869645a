//! Archipelago construction
//!
//! Builds `count` islands from one shared set of construction arguments,
//! deriving per-island population seeds from a single top-level seed when
//! one is given.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algorithm::traits::IntoAlgorithm;
use crate::algorithm::Algorithm;
use crate::archipelago::Archipelago;
use crate::error::{ConstructionError, PelagoResult};
use crate::island::runner::Runner;
use crate::island::Island;
use crate::population::Population;
use crate::problem::traits::IntoProblem;
use crate::problem::Problem;

/// Builder for [`Archipelago`]
///
/// Accepts the same argument grammar as
/// [`IslandBuilder`](crate::island::IslandBuilder), with two differences:
/// the population size is named [`pop_size`](Self::pop_size), so it cannot
/// be mistaken for the island count, and [`seed`](Self::seed) is the
/// archipelago-level derivation seed, not a per-island one. With a seed,
/// one deterministic generator draws `count` successive values in
/// island-index order as the per-island population seeds: two identically
/// seeded builds produce bit-identical initial populations per island,
/// while island-to-island populations still differ. Without a seed, every
/// island seeds independently from system entropy.
pub struct ArchipelagoBuilder {
    count: usize,
    algorithm: Option<Algorithm>,
    population: Option<Population>,
    problem: Option<PelagoResult<Problem>>,
    pop_size: Option<usize>,
    seed: Option<u64>,
    runner: Option<Box<dyn Runner>>,
}

impl ArchipelagoBuilder {
    /// Create a builder for `count` islands
    pub fn new(count: usize) -> Self {
        Self {
            count,
            algorithm: None,
            population: None,
            problem: None,
            pop_size: None,
            seed: None,
            runner: None,
        }
    }

    /// The algorithm every island evolves with (mandatory)
    pub fn algorithm(mut self, algo: impl IntoAlgorithm) -> Self {
        self.algorithm = Some(algo.into_algorithm());
        self
    }

    /// A template population, deep-copied into every island
    pub fn population(mut self, pop: Population) -> Self {
        self.population = Some(pop);
        self
    }

    /// The problem every island's population is built from
    pub fn problem(mut self, prob: impl IntoProblem) -> Self {
        self.problem = Some(prob.into_problem());
        self
    }

    /// Population size per island, used together with [`problem`](Self::problem)
    pub fn pop_size(mut self, size: usize) -> Self {
        self.pop_size = Some(size);
        self
    }

    /// Archipelago-level seed for deterministic per-island seed derivation
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A custom execution strategy, deep-copied into every island
    pub fn runner(mut self, runner: impl Runner) -> Self {
        self.runner = Some(Box::new(runner));
        self
    }

    /// Validate the argument combination and build the archipelago
    pub fn build(self) -> PelagoResult<Archipelago> {
        let algorithm = self
            .algorithm
            .ok_or(ConstructionError::MissingArgument("algorithm"))?;

        enum Source {
            Template(Population),
            Build(Problem, usize),
        }

        let source = match (self.population, self.problem) {
            (Some(_), Some(_)) => {
                return Err(ConstructionError::ConflictingArguments(
                    "a population cannot be combined with a problem",
                )
                .into());
            }
            (Some(pop), None) => {
                if self.pop_size.is_some() || self.seed.is_some() {
                    return Err(ConstructionError::ConflictingArguments(
                        "a population cannot be combined with pop_size or seed",
                    )
                    .into());
                }
                Source::Template(pop)
            }
            (None, Some(problem)) => {
                let problem = problem?;
                let size = self
                    .pop_size
                    .ok_or(ConstructionError::MissingArgument("pop_size"))?;
                Source::Build(problem, size)
            }
            (None, None) => {
                return Err(ConstructionError::MissingArgument(
                    "population (or problem and pop_size)",
                )
                .into());
            }
        };

        let mut seed_rng = self.seed.map(StdRng::seed_from_u64);
        let mut archi = Archipelago::new();
        for _ in 0..self.count {
            let population = match &source {
                Source::Template(pop) => pop.clone(),
                Source::Build(problem, size) => {
                    let island_seed = seed_rng.as_mut().map(|rng| rng.gen::<u64>());
                    Population::new(problem.clone(), *size, island_seed)?
                }
            };
            let island = match &self.runner {
                Some(runner) => {
                    Island::with_boxed_runner(runner.clone_runner(), algorithm.clone(), population)
                }
                None => Island::new(algorithm.clone(), population),
            };
            archi.push_back(island);
        }
        Ok(archi)
    }
}
