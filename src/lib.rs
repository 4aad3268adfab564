//! Statehub: a minimal single-threaded state store
//!
//! A store holds one state value and a fixed set of named actions. Each
//! dispatch runs an action, replaces the state with its result and
//! synchronously notifies every subscriber before returning.
//!
//! # Core Concepts
//!
//! - **Actions**: Named pure transitions `(state, payload) -> state`
//! - **Store**: Owns the current state and dispatches actions by name
//! - **Notifier**: Ordered, synchronous fan-out to subscribers
//! - **Replay-on-subscribe**: A new subscriber immediately receives the
//!   current state
//!
//! # Example
//!
//! ```rust
//! use statehub::builder::StoreBuilder;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! let store = StoreBuilder::new()
//!     .initial(Counter { count: 0 })
//!     .action("increment", |s: &Counter, by: Option<i64>| Counter {
//!         count: s.count + by.unwrap_or(1),
//!     })
//!     .build()
//!     .unwrap();
//!
//! let calls = Rc::new(Cell::new(0));
//! let seen = Rc::clone(&calls);
//! let subscription = store.subscribe(move |_: &Counter| seen.set(seen.get() + 1));
//! assert_eq!(calls.get(), 1);
//!
//! store.dispatch("increment", None).unwrap();
//! assert_eq!(calls.get(), 2);
//!
//! subscription.unsubscribe();
//! store.dispatch("increment", Some(5)).unwrap();
//! assert_eq!(calls.get(), 2);
//! assert_eq!(store.state(), Counter { count: 6 });
//!
//! assert!(store.dispatch("decrement", None).is_err());
//! ```

pub mod builder;
pub mod core;
pub mod json;
pub mod notifier;
pub mod store;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use crate::builder::{BuildError, StoreBuilder};
pub use crate::core::{Action, ActionMap, StoreMetadata};
pub use crate::notifier::{Notifier, Subscription, SubscriptionGuard, SubscriptionId};
pub use crate::store::{DispatchError, Store, StoreConfig, SubscriberPanicPolicy};
