//! Error types for pelago
//!
//! This module defines all error types used throughout the library.

use std::fmt;

use thiserror::Error;

/// Error type for constructing wrappers, populations, islands and archipelagos
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstructionError {
    /// A mandatory argument was not supplied
    #[error("missing mandatory argument: {0}")]
    MissingArgument(&'static str),

    /// Two arguments that exclude each other were both supplied
    #[error("conflicting arguments: {0}")]
    ConflictingArguments(&'static str),

    /// An argument value is outside its legal domain
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },

    /// The plugin could not report consistent introspection data
    #[error("plugin introspection failed: {0}")]
    Introspection(String),
}

/// Error type for meta-wrapper parameter validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Vector parameter has the wrong length
    #[error("length mismatch for '{name}': expected {expected}, got {actual}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Weight vector violates positivity or normalization
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    /// Scalar parameter outside its legal range
    #[error("parameter '{name}' out of range: {reason}")]
    OutOfRange {
        name: &'static str,
        reason: String,
    },

    /// The wrapped plugin does not satisfy a structural precondition
    #[error("incompatible inner plugin: {0}")]
    IncompatibleInner(String),
}

/// Error type for failures inside user plugin code
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    /// The plugin reported a failure
    #[error("plugin failure: {0}")]
    Plugin(String),

    /// The plugin panicked during a step or fitness evaluation
    #[error("plugin panicked: {0}")]
    Panicked(String),

    /// Fitness vector has the wrong length
    #[error("fitness length mismatch: expected {expected}, got {actual}")]
    FitnessLength { expected: usize, actual: usize },

    /// Decision vector has the wrong length
    #[error("decision vector length mismatch: expected {expected}, got {actual}")]
    DecisionLength { expected: usize, actual: usize },

    /// Operation requires individuals but the population is empty
    #[error("empty population")]
    EmptyPopulation,

    /// Operation is undefined for this problem shape
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Error type for execution backend faults
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PoolError {
    /// A worker died before reporting a result
    #[error("worker lost: {0}")]
    WorkerLost(String),

    /// The pool could not be created or reached
    #[error("pool unavailable: {0}")]
    Unavailable(String),
}

/// Aggregate of every island that failed during an archipelago wait
///
/// Indices refer to insertion order within the archipelago. Islands that are
/// not listed completed their queues successfully and remain usable.
#[derive(Debug, Clone, PartialEq)]
pub struct IslandFailures {
    /// (island index, captured error) pairs, in index order
    pub failures: Vec<(usize, PelagoError)>,
}

impl fmt::Display for IslandFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evolution failed on {} island(s):", self.failures.len())?;
        for (idx, err) in &self.failures {
            write!(f, " [island {idx}] {err};")?;
        }
        Ok(())
    }
}

impl std::error::Error for IslandFailures {}

/// Top-level error type for orchestration operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PelagoError {
    /// Construction error
    #[error("construction error: {0}")]
    Construction(#[from] ConstructionError),

    /// Validation error
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Evaluation error
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Pool error
    #[error("pool error: {0}")]
    Pool(#[from] PoolError),

    /// One or more islands failed during an archipelago wait
    #[error(transparent)]
    Islands(#[from] IslandFailures),
}

/// Result type alias for orchestration operations
pub type PelagoResult<T> = Result<T, PelagoError>;
