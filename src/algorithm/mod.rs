//! Algorithm wrappers and meta-algorithms
//!
//! This module provides the Algorithm value wrapper around user-supplied
//! evolvers, the built-in algorithms, and the meta-algorithms that wrap one
//! algorithm into another.

#[allow(clippy::module_inception)]
pub mod algorithm;
pub mod cstrs;
pub mod mbh;
pub mod random_search;
pub mod traits;

pub use algorithm::Algorithm;

pub mod prelude {
    pub use super::algorithm::*;
    pub use super::cstrs::*;
    pub use super::mbh::*;
    pub use super::random_search::*;
    pub use super::traits::*;
}
