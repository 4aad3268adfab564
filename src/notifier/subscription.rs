//! Cancellation handles returned by [`Notifier::subscribe`](super::Notifier::subscribe).

use super::Registry;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;
use uuid::Uuid;

/// Identity of a single registration.
///
/// Registering the same callback twice yields two distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Handle for cancelling one registration.
///
/// Dropping the handle leaves the callback registered; call
/// [`unsubscribe`](Self::unsubscribe) or convert it with
/// [`into_guard`](Self::into_guard) for scoped listeners.
pub struct Subscription<T> {
    id: SubscriptionId,
    registry: Weak<RefCell<Registry<T>>>,
}

impl<T> Subscription<T> {
    pub(super) fn new(id: SubscriptionId, registry: Weak<RefCell<Registry<T>>>) -> Self {
        Self { id, registry }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the registration this handle was issued for.
    ///
    /// Returns `true` if the registration was still present. Calling this
    /// again, or after the notifier is gone, is a no-op returning `false`.
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = registry.borrow_mut();
        let removed = registry.remove(self.id);
        if removed {
            tracing::trace!(
                store = registry.label(),
                subscription = %self.id,
                "subscriber removed"
            );
        }
        removed
    }

    /// Check whether the registration is still live.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }

    /// Tie the registration to the lifetime of the returned guard.
    pub fn into_guard(self) -> SubscriptionGuard<T> {
        SubscriptionGuard { subscription: self }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// Unsubscribes when dropped.
#[must_use = "dropping the guard unsubscribes immediately"]
pub struct SubscriptionGuard<T> {
    subscription: Subscription<T>,
}

impl<T> SubscriptionGuard<T> {
    pub fn id(&self) -> SubscriptionId {
        self.subscription.id()
    }

    /// Give up scoped ownership and keep the registration alive.
    pub fn release(mut self) -> Subscription<T> {
        // Leave a dangling handle behind so the guard's drop is a no-op.
        let registry = std::mem::replace(&mut self.subscription.registry, Weak::new());
        Subscription::new(self.subscription.id, registry)
    }
}

impl<T> Drop for SubscriptionGuard<T> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

impl<T> fmt::Debug for SubscriptionGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubscriptionGuard")
            .field(&self.subscription)
            .finish()
    }
}
