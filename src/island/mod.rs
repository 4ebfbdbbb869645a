//! Islands
//!
//! This module provides the Island type, its construction builder, and the
//! execution strategy trait.

pub mod builder;
#[allow(clippy::module_inception)]
pub mod island;
pub mod runner;

pub use builder::IslandBuilder;
pub use island::{Island, IslandStatus};
pub use runner::{Runner, StepRunner};

pub mod prelude {
    pub use super::builder::*;
    pub use super::island::*;
    pub use super::runner::*;
}
