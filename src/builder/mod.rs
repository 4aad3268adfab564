//! Builder API for ergonomic store construction.
//!
//! This module provides a fluent builder and the [`action_map!`](crate::action_map)
//! macro for assembling stores with validation up front.

pub mod error;
pub mod macros;
pub mod store;

pub use error::BuildError;
pub use store::StoreBuilder;
