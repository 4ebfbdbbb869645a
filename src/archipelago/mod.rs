//! Archipelagos
//!
//! This module provides the Archipelago type and its construction builder.

#[allow(clippy::module_inception)]
pub mod archipelago;
pub mod builder;

pub use archipelago::Archipelago;
pub use builder::ArchipelagoBuilder;

pub mod prelude {
    pub use super::archipelago::*;
    pub use super::builder::*;
}
