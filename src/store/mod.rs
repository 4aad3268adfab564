//! The state store: current state, named actions and subscribers.
//!
//! A [`Store`] owns exactly one state value, a fixed [`ActionMap`] and its
//! own [`Notifier`]. [`Store::dispatch`] runs a named action, replaces the
//! state with the result and publishes it to every subscriber before
//! returning. [`Store::subscribe`] replays the current state to the new
//! subscriber immediately, then registers it for future dispatches.
//!
//! Stores are single-threaded (`!Send`, `!Sync`). Subscribers that hold
//! the store through an `Rc` may dispatch from inside their callback; the
//! nested dispatch runs to completion before the outer publish resumes.

mod config;
mod error;

pub use crate::notifier::SubscriberPanicPolicy;
pub use config::StoreConfig;
pub use error::DispatchError;

use crate::core::{ActionMap, StoreMetadata};
use crate::notifier::{Notifier, Subscription};
use std::cell::RefCell;
use std::fmt;

/// Single-threaded state container driven by named actions.
///
/// # Example
///
/// ```rust
/// use statehub::core::ActionMap;
/// use statehub::store::{DispatchError, Store};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Counter {
///     count: i64,
/// }
///
/// let actions = ActionMap::new().with("increment", |s: &Counter, by: Option<i64>| Counter {
///     count: s.count + by.unwrap_or(1),
/// });
/// let store = Store::new(actions, Counter { count: 0 });
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let _subscription = store.subscribe(move |s: &Counter| sink.borrow_mut().push(s.count));
///
/// store.dispatch("increment", None).unwrap();
/// store.dispatch("increment", Some(5)).unwrap();
/// assert_eq!(
///     store.dispatch("decrement", None),
///     Err(DispatchError::UnknownAction { name: "decrement".into() })
/// );
///
/// assert_eq!(store.state(), Counter { count: 6 });
/// assert_eq!(*seen.borrow(), vec![0, 1, 6]);
/// ```
pub struct Store<S, P> {
    state: RefCell<S>,
    actions: ActionMap<S, P>,
    notifier: Notifier<S>,
    metadata: RefCell<StoreMetadata>,
    config: StoreConfig,
}

impl<S: Clone + 'static, P> Store<S, P> {
    /// Create a store with the default configuration.
    pub fn new(actions: ActionMap<S, P>, initial: S) -> Self {
        Self::with_config(actions, initial, StoreConfig::default())
    }

    pub fn with_config(actions: ActionMap<S, P>, initial: S, config: StoreConfig) -> Self {
        tracing::debug!(
            store = config.label_or_default(),
            actions = actions.len(),
            "store created"
        );
        Self {
            state: RefCell::new(initial),
            actions,
            notifier: Notifier::with_panic_policy(config.subscriber_panics)
                .with_label(config.label_or_default()),
            metadata: RefCell::new(StoreMetadata::default()),
            config,
        }
    }

    /// Run the action registered under `name` and publish the new state.
    ///
    /// The action's return value always becomes the new state, and every
    /// current subscriber sees it before this call returns.
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnknownAction`] if no action is registered under
    /// `name`. The failure is logged as a warning; the state is left
    /// untouched and nobody is notified.
    pub fn dispatch(&self, name: &str, payload: P) -> Result<(), DispatchError> {
        let store = self.config.label_or_default();

        let Some(action) = self.actions.get(name) else {
            self.metadata.borrow_mut().record_rejection();
            let error = DispatchError::UnknownAction {
                name: name.to_string(),
            };
            tracing::warn!(store, action = name, "{error}");
            return Err(error);
        };

        let next = {
            let current = self.state.borrow();
            action.apply(&current, payload)
        };
        *self.state.borrow_mut() = next.clone();
        self.metadata.borrow_mut().record_dispatch();

        tracing::debug!(store, action = name, "dispatched");
        self.notifier.publish(&next);
        Ok(())
    }

    /// Register `callback` for state changes, calling it once right away
    /// with the current state.
    ///
    /// The replay happens before registration and bypasses the panic
    /// policy, so a panic there always reaches the caller.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<S>
    where
        F: Fn(&S) + 'static,
    {
        let current = self.state();
        callback(&current);
        self.notifier.subscribe(callback)
    }

    /// Clone of the current state.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Borrow the current state for the duration of `f`.
    ///
    /// `f` must not dispatch on this store.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains(name)
    }

    /// Registered action names, sorted.
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.names().collect();
        names.sort_unstable();
        names
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.len()
    }

    pub fn metadata(&self) -> StoreMetadata {
        self.metadata.borrow().clone()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl<S: Clone + Default + 'static, P> Store<S, P> {
    /// Create a store starting from `S::default()`.
    pub fn with_default_state(actions: ActionMap<S, P>) -> Self {
        Self::new(actions, S::default())
    }
}

impl<S: fmt::Debug, P> fmt::Debug for Store<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state.borrow())
            .field("actions", &self.actions)
            .field("notifier", &self.notifier)
            .field("config", &self.config)
            .finish()
    }
}
