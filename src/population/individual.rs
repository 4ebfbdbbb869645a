//! Individual type
//!
//! This module provides the individual record stored in a population.

use serde::{Deserialize, Serialize};

/// A candidate solution within a population
///
/// Carries a decision vector, the fitness vector computed for it by the
/// population's problem, and an id unique within the owning population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Identifier, unique within the owning population
    pub id: u64,
    /// Decision vector, sized to the problem dimension
    pub x: Vec<f64>,
    /// Fitness vector, sized to `nobj + nec + nic`
    pub f: Vec<f64>,
}

impl Individual {
    /// Create an individual
    pub fn new(id: u64, x: Vec<f64>, f: Vec<f64>) -> Self {
        Self { id, x, f }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_fields() {
        let ind = Individual::new(7, vec![1.0, 2.0], vec![5.0]);
        assert_eq!(ind.id, 7);
        assert_eq!(ind.x, vec![1.0, 2.0]);
        assert_eq!(ind.f, vec![5.0]);
    }

    #[test]
    fn test_individual_serde_roundtrip() {
        let ind = Individual::new(1, vec![0.5], vec![0.25]);
        let json = serde_json::to_string(&ind).unwrap();
        let back: Individual = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ind);
    }
}
