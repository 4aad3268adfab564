//! Named state transitions.
//!
//! An [`Action`] computes the next state from the current state and a
//! payload. A store is built from an [`ActionMap`], which fixes the set of
//! action names for the lifetime of the store.

use std::collections::HashMap;
use std::fmt;

/// Pure transition from the current state to the next one.
///
/// Actions receive a borrow of the current state plus the dispatched
/// payload and return the replacement state. They must not re-enter the
/// store they are registered with.
///
/// # Example
///
/// ```rust
/// use statehub::core::Action;
///
/// let add = Action::new(|count: &i64, amount: i64| count + amount);
///
/// assert_eq!(add.apply(&40, 2), 42);
/// ```
pub struct Action<S, P> {
    transition: Box<dyn Fn(&S, P) -> S>,
}

impl<S, P> Action<S, P> {
    /// Create an action from a transition function.
    pub fn new<F>(transition: F) -> Self
    where
        F: Fn(&S, P) -> S + 'static,
    {
        Action {
            transition: Box::new(transition),
        }
    }

    /// Compute the next state.
    pub fn apply(&self, state: &S, payload: P) -> S {
        (self.transition)(state, payload)
    }
}

impl<S, P> fmt::Debug for Action<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

/// Fixed association of action names to transitions.
///
/// Keys are unique: inserting under an existing name replaces the previous
/// action and hands it back. Use [`StoreBuilder`](crate::builder::StoreBuilder)
/// when duplicates should be rejected instead.
///
/// # Example
///
/// ```rust
/// use statehub::core::ActionMap;
///
/// let actions = ActionMap::new()
///     .with("double", |n: &u32, _: ()| n * 2)
///     .with("reset", |_: &u32, _: ()| 0);
///
/// assert!(actions.contains("double"));
/// assert_eq!(actions.len(), 2);
/// ```
pub struct ActionMap<S, P> {
    actions: HashMap<String, Action<S, P>>,
}

impl<S, P> Default for ActionMap<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, P> ActionMap<S, P> {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Add an action, returning the mapping for chaining.
    pub fn with<F>(mut self, name: impl Into<String>, transition: F) -> Self
    where
        F: Fn(&S, P) -> S + 'static,
    {
        self.insert(name, Action::new(transition));
        self
    }

    /// Insert an action, returning the one it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, action: Action<S, P>) -> Option<Action<S, P>> {
        self.actions.insert(name.into(), action)
    }

    /// Look up an action by name.
    pub fn get(&self, name: &str) -> Option<&Action<S, P>> {
        self.actions.get(name)
    }

    /// Check whether an action is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered action names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<S, P> fmt::Debug for ActionMap<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ActionMap").field("actions", &names).finish()
    }
}

impl<S, P> IntoIterator for ActionMap<S, P> {
    type Item = (String, Action<S, P>);
    type IntoIter = std::collections::hash_map::IntoIter<String, Action<S, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl<S, P, N> FromIterator<(N, Action<S, P>)> for ActionMap<S, P>
where
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, Action<S, P>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, action) in iter {
            map.insert(name, action);
        }
        map
    }
}
