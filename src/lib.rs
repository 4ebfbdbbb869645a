//! # pelago
//!
//! An asynchronous orchestration engine for population-based optimization.
//!
//! pelago runs many independent *islands*, each pairing one optimization
//! algorithm with one evolving population, and coordinates their concurrent
//! progress, result aggregation, and safe execution isolation. The
//! optimization mathematics is pluggable: problems and algorithms are
//! opaque, user-supplied plugins behind the [`Evaluator`](problem::traits::Evaluator)
//! and [`Evolver`](algorithm::traits::Evolver) traits.
//!
//! ## Core Concepts
//!
//! - **Per-island serialization**: tasks of one island run strictly in
//!   submission order, never concurrently, so a population is only ever
//!   mutated by one step at a time
//! - **Safety-routed execution**: plugins declare a thread safety level;
//!   islands route their work to a shared thread pool or to isolated
//!   workers accordingly
//! - **Deterministic seeding**: one archipelago-level seed derives every
//!   island's population seed, reproducibly
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pelago::prelude::*;
//!
//! let archi = ArchipelagoBuilder::new(4)
//!     .algorithm(RandomSearch::new(100))
//!     .problem(Rosenbrock::new(10))
//!     .pop_size(20)
//!     .seed(32)
//!     .build()?;
//!
//! archi.evolve();
//! archi.wait()?;
//! let champions = archi.get_champions_f()?;
//! ```

pub mod algorithm;
pub mod archipelago;
pub mod backend;
pub mod error;
pub mod island;
pub mod population;
pub mod problem;
pub mod safety;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::prelude::*;
    pub use crate::archipelago::prelude::*;
    pub use crate::backend::prelude::*;
    pub use crate::error::*;
    pub use crate::island::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::problem::prelude::*;
    pub use crate::safety::ThreadSafety;
}
