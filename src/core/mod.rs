//! Core value types shared by the store and its builder.
//!
//! - [`Action`] and [`ActionMap`]: named, pure state transitions
//! - [`StoreMetadata`]: dispatch counters and timestamps
//!
//! Nothing in this module performs I/O or notifies anyone; the store
//! drives these types and owns the side effects.

mod action;
mod metadata;

pub use action::{Action, ActionMap};
pub use metadata::StoreMetadata;
