//! Problem wrappers and meta-problems
//!
//! This module provides the Problem value wrapper around user-supplied
//! evaluators, benchmark evaluators, and the meta-problems that transform
//! one problem into another.

pub mod benchmarks;
pub mod decompose;
#[allow(clippy::module_inception)]
pub mod problem;
pub mod traits;
pub mod translate;
pub mod unconstrain;

pub use problem::Problem;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::decompose::*;
    pub use super::problem::*;
    pub use super::traits::*;
    pub use super::translate::*;
    pub use super::unconstrain::*;
}
