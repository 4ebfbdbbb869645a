//! Island construction
//!
//! Replaces loosely-typed keyword construction with an explicit options
//! builder: every legal argument has a named setter, illegal names cannot be
//! expressed, and the mutually exclusive combinations are validated once, in
//! [`IslandBuilder::build`].

use crate::algorithm::traits::IntoAlgorithm;
use crate::algorithm::Algorithm;
use crate::error::{ConstructionError, PelagoResult};
use crate::island::runner::Runner;
use crate::island::Island;
use crate::population::Population;
use crate::problem::traits::IntoProblem;
use crate::problem::Problem;

/// Builder for [`Island`]
///
/// The algorithm is mandatory. The population is given either directly with
/// [`population`](Self::population), or built from
/// [`problem`](Self::problem) and [`size`](Self::size) (plus an optional
/// [`seed`](Self::seed)) — never both.
#[derive(Default)]
pub struct IslandBuilder {
    algorithm: Option<Algorithm>,
    population: Option<Population>,
    problem: Option<PelagoResult<Problem>>,
    size: Option<usize>,
    seed: Option<u64>,
    runner: Option<Box<dyn Runner>>,
}

impl IslandBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// The algorithm to evolve with (mandatory)
    pub fn algorithm(mut self, algo: impl IntoAlgorithm) -> Self {
        self.algorithm = Some(algo.into_algorithm());
        self
    }

    /// An already-built population
    pub fn population(mut self, pop: Population) -> Self {
        self.population = Some(pop);
        self
    }

    /// The problem to build a population from
    pub fn problem(mut self, prob: impl IntoProblem) -> Self {
        self.problem = Some(prob.into_problem());
        self
    }

    /// Population size, used together with [`problem`](Self::problem)
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Population seed, used together with [`problem`](Self::problem)
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A custom execution strategy
    pub fn runner(mut self, runner: impl Runner) -> Self {
        self.runner = Some(Box::new(runner));
        self
    }

    /// Validate the argument combination and build the island
    pub fn build(self) -> PelagoResult<Island> {
        let algorithm = self
            .algorithm
            .ok_or(ConstructionError::MissingArgument("algorithm"))?;

        let population = match (self.population, self.problem) {
            (Some(_), Some(_)) => {
                return Err(ConstructionError::ConflictingArguments(
                    "a population cannot be combined with a problem",
                )
                .into());
            }
            (Some(pop), None) => {
                if self.size.is_some() || self.seed.is_some() {
                    return Err(ConstructionError::ConflictingArguments(
                        "a population cannot be combined with size or seed",
                    )
                    .into());
                }
                pop
            }
            (None, Some(problem)) => {
                let problem = problem?;
                let size = self.size.ok_or(ConstructionError::MissingArgument("size"))?;
                Population::new(problem, size, self.seed)?
            }
            (None, None) => {
                return Err(ConstructionError::MissingArgument(
                    "population (or problem and size)",
                )
                .into());
            }
        };

        Ok(match self.runner {
            Some(runner) => Island::with_boxed_runner(runner, algorithm, population),
            None => Island::new(algorithm, population),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::traits::NullEvolver;
    use crate::error::PelagoError;
    use crate::problem::benchmarks::Sphere;

    #[test]
    fn test_builder_from_problem_and_size() {
        let island = IslandBuilder::new()
            .algorithm(NullEvolver)
            .problem(Sphere::new(2))
            .size(10)
            .seed(42)
            .build()
            .unwrap();
        assert_eq!(island.population().len(), 10);
        assert_eq!(island.population().seed(), 42);
    }

    #[test]
    fn test_builder_from_population() {
        let pop = Population::new(Sphere::new(2), 5, Some(1)).unwrap();
        let island = IslandBuilder::new()
            .algorithm(NullEvolver)
            .population(pop)
            .build()
            .unwrap();
        assert_eq!(island.population().len(), 5);
    }

    #[test]
    fn test_builder_requires_algorithm() {
        let err = IslandBuilder::new()
            .problem(Sphere::new(2))
            .size(5)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            PelagoError::Construction(ConstructionError::MissingArgument("algorithm"))
        );
    }

    #[test]
    fn test_builder_rejects_population_plus_problem() {
        let pop = Population::new(Sphere::new(2), 5, Some(1)).unwrap();
        let err = IslandBuilder::new()
            .algorithm(NullEvolver)
            .population(pop)
            .problem(Sphere::new(2))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            PelagoError::Construction(ConstructionError::ConflictingArguments(_))
        ));
    }

    #[test]
    fn test_builder_rejects_population_plus_seed() {
        let pop = Population::new(Sphere::new(2), 5, Some(1)).unwrap();
        let err = IslandBuilder::new()
            .algorithm(NullEvolver)
            .population(pop)
            .seed(9)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            PelagoError::Construction(ConstructionError::ConflictingArguments(_))
        ));
    }

    #[test]
    fn test_builder_requires_size_with_problem() {
        let err = IslandBuilder::new()
            .algorithm(NullEvolver)
            .problem(Sphere::new(2))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            PelagoError::Construction(ConstructionError::MissingArgument("size"))
        );
    }

    #[test]
    fn test_builder_requires_some_population_source() {
        let err = IslandBuilder::new().algorithm(NullEvolver).build().unwrap_err();
        assert!(matches!(
            err,
            PelagoError::Construction(ConstructionError::MissingArgument(_))
        ));
    }
}
