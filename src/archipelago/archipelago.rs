//! Archipelago type
//!
//! An ordered collection of islands evolved and queried together. Insertion
//! order is the public index: champions, statuses, and aggregated errors all
//! refer to islands by that index.

use std::fmt;

use crate::error::{IslandFailures, PelagoResult};
use crate::island::Island;

/// Ordered collection of islands, evolved and queried together
#[derive(Default)]
pub struct Archipelago {
    islands: Vec<Island>,
}

impl Archipelago {
    /// Create an empty archipelago
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of islands
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    /// Whether the archipelago holds no islands
    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// Get an island by insertion index
    pub fn get(&self, idx: usize) -> Option<&Island> {
        self.islands.get(idx)
    }

    /// Iterate over the islands in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Island> {
        self.islands.iter()
    }

    /// Append an island
    ///
    /// Valid at any time, including while other islands are busy. The new
    /// island starts idle and unaffected by its siblings. Build the island
    /// with [`IslandBuilder`](crate::island::IslandBuilder) for the full
    /// argument grammar.
    pub fn push_back(&mut self, island: Island) {
        self.islands.push(island);
    }

    /// Enqueue one evolution task on every island, in order; never blocks
    pub fn evolve(&self) {
        self.evolve_n(1);
    }

    /// Enqueue `n` evolution tasks on every island, in order; never blocks
    ///
    /// Tasks of one island still execute strictly one at a time.
    pub fn evolve_n(&self, n: usize) {
        for island in &self.islands {
            for _ in 0..n {
                island.evolve();
            }
        }
    }

    /// Block until every island's queue drains
    ///
    /// Never stops at the first failure: every island is waited on, every
    /// captured error is collected, and one aggregate error naming each
    /// failed island by index is returned. Non-failing islands remain
    /// usable, and failed islands are idle again once this call returns.
    pub fn wait(&self) -> PelagoResult<()> {
        let mut failures = Vec::new();
        for (idx, island) in self.islands.iter().enumerate() {
            if let Err(e) = island.wait() {
                failures.push((idx, e));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(IslandFailures { failures }.into())
        }
    }

    /// Champion fitness vector of every island, in insertion order
    ///
    /// The result length always equals the island count at call time.
    pub fn get_champions_f(&self) -> PelagoResult<Vec<Vec<f64>>> {
        self.islands
            .iter()
            .map(|island| island.population().champion_f())
            .collect()
    }

    /// Champion decision vector of every island, in insertion order
    pub fn get_champions_x(&self) -> PelagoResult<Vec<Vec<f64>>> {
        self.islands
            .iter()
            .map(|island| island.population().champion_x())
            .collect()
    }

    /// Whether any island is currently busy
    pub fn evolving(&self) -> bool {
        self.islands.iter().any(|island| island.status().is_busy())
    }
}

impl fmt::Debug for Archipelago {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archipelago")
            .field("islands", &self.islands.len())
            .field("evolving", &self.evolving())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::random_search::RandomSearch;
    use crate::algorithm::traits::NullEvolver;
    use crate::island::IslandBuilder;
    use crate::problem::benchmarks::Sphere;

    fn island(seed: u64) -> Island {
        IslandBuilder::new()
            .algorithm(RandomSearch::new(10))
            .problem(Sphere::new(2))
            .size(10)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_archipelago() {
        let archi = Archipelago::new();
        assert!(archi.is_empty());
        assert!(!archi.evolving());
        archi.wait().unwrap();
        assert!(archi.get_champions_f().unwrap().is_empty());
    }

    #[test]
    fn test_push_back_preserves_order() {
        let mut archi = Archipelago::new();
        archi.push_back(island(1));
        archi.push_back(island(2));
        assert_eq!(archi.len(), 2);
        assert_eq!(archi.get(0).unwrap().population().seed(), 1);
        assert_eq!(archi.get(1).unwrap().population().seed(), 2);
    }

    #[test]
    fn test_champions_match_island_count() {
        let mut archi = Archipelago::new();
        for seed in 0..5 {
            archi.push_back(island(seed));
        }
        assert_eq!(archi.get_champions_f().unwrap().len(), 5);
        assert_eq!(archi.get_champions_x().unwrap().len(), 5);
    }

    #[test]
    fn test_evolve_and_wait() {
        let mut archi = Archipelago::new();
        for seed in 0..3 {
            archi.push_back(island(seed));
        }
        let before = archi.get_champions_f().unwrap();
        archi.evolve_n(2);
        archi.wait().unwrap();
        let after = archi.get_champions_f().unwrap();
        for (b, a) in before.iter().zip(&after) {
            assert!(a[0] <= b[0]);
        }
    }

    #[test]
    fn test_null_evolution_is_a_fixed_point() {
        let mut archi = Archipelago::new();
        archi.push_back(
            IslandBuilder::new()
                .algorithm(NullEvolver)
                .problem(Sphere::new(2))
                .size(4)
                .seed(9)
                .build()
                .unwrap(),
        );
        let before = archi.get_champions_x().unwrap();
        archi.evolve();
        archi.wait().unwrap();
        assert_eq!(archi.get_champions_x().unwrap(), before);
    }
}
