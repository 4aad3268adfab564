//! Builder for constructing stores.

use crate::builder::error::BuildError;
use crate::core::{Action, ActionMap};
use crate::store::{Store, StoreConfig, SubscriberPanicPolicy};

/// Builder for constructing stores with a fluent API.
pub struct StoreBuilder<S, P> {
    initial: Option<S>,
    actions: ActionMap<S, P>,
    duplicate: Option<String>,
    config: StoreConfig,
}

impl<S: Clone + 'static, P> StoreBuilder<S, P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            actions: ActionMap::new(),
            duplicate: None,
            config: StoreConfig::default(),
        }
    }

    /// Set the initial state (required unless using `build_with_default`).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Register an action under `name`.
    /// Registering the same name twice makes `build` fail.
    pub fn action<F>(self, name: impl Into<String>, transition: F) -> Self
    where
        F: Fn(&S, P) -> S + 'static,
    {
        self.add_action(name, Action::new(transition))
    }

    /// Register a pre-built action.
    pub fn add_action(mut self, name: impl Into<String>, action: Action<S, P>) -> Self {
        let name = name.into();
        if self.actions.insert(name.clone(), action).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(name);
        }
        self
    }

    /// Register every action from an existing mapping.
    pub fn actions(mut self, actions: ActionMap<S, P>) -> Self {
        for (name, action) in actions {
            self = self.add_action(name, action);
        }
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    pub fn panic_policy(mut self, policy: SubscriberPanicPolicy) -> Self {
        self.config.subscriber_panics = policy;
        self
    }

    /// Build the store.
    /// Returns an error if the initial state is missing or an action name
    /// was registered twice.
    pub fn build(self) -> Result<Store<S, P>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if let Some(name) = self.duplicate {
            return Err(BuildError::DuplicateAction { name });
        }

        Ok(Store::with_config(self.actions, initial, self.config))
    }
}

impl<S: Clone + Default + 'static, P> StoreBuilder<S, P> {
    /// Build the store, starting from `S::default()` when no initial state
    /// was given.
    pub fn build_with_default(mut self) -> Result<Store<S, P>, BuildError> {
        if self.initial.is_none() {
            self.initial = Some(S::default());
        }
        self.build()
    }
}

impl<S: Clone + 'static, P> Default for StoreBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}
