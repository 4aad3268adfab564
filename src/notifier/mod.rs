//! Synchronous fan-out of values to registered callbacks.
//!
//! A [`Notifier`] keeps subscribers in registration order and delivers
//! every published value to each of them before `publish` returns.
//!
//! # Invariants
//!
//! 1. Subscribers are invoked in registration order.
//! 2. `publish` iterates a snapshot taken when it starts: registrations
//!    added or removed by a callback take effect from the next publish.
//! 3. No internal borrow is held while a callback runs, so callbacks may
//!    subscribe, unsubscribe or publish again.
//! 4. A [`Subscription`] removes exactly its own registration, even when
//!    the same callback was registered more than once.

mod policy;
mod subscription;

pub use policy::SubscriberPanicPolicy;
pub use subscription::{Subscription, SubscriptionGuard, SubscriptionId};

use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// Label used until [`Notifier::with_label`] sets one.
pub const DEFAULT_LABEL: &str = "store";

type Callback<T> = Rc<dyn Fn(&T)>;

/// Registered callbacks, shared between a notifier and its handles.
pub(crate) struct Registry<T> {
    entries: Vec<(SubscriptionId, Callback<T>)>,
    /// Recorded as the `store` field on every event
    label: Rc<str>,
}

impl<T> Registry<T> {
    fn push(&mut self, id: SubscriptionId, callback: Callback<T>) {
        self.entries.push((id, callback));
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    fn snapshot(&self) -> Vec<(SubscriptionId, Callback<T>)> {
        self.entries
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect()
    }
}

/// Ordered list of subscribers with synchronous delivery.
///
/// # Example
///
/// ```rust
/// use statehub::notifier::Notifier;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let notifier = Notifier::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&seen);
/// let subscription = notifier.subscribe(move |value: &u8| sink.borrow_mut().push(*value));
///
/// notifier.publish(&1);
/// subscription.unsubscribe();
/// notifier.publish(&2);
///
/// assert_eq!(*seen.borrow(), vec![1]);
/// ```
pub struct Notifier<T> {
    registry: Rc<RefCell<Registry<T>>>,
    panic_policy: SubscriberPanicPolicy,
}

impl<T: 'static> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Notifier<T> {
    /// Create a notifier whose subscriber panics unwind out of `publish`.
    pub fn new() -> Self {
        Self::with_panic_policy(SubscriberPanicPolicy::default())
    }

    pub fn with_panic_policy(panic_policy: SubscriberPanicPolicy) -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                entries: Vec::new(),
                label: Rc::from(DEFAULT_LABEL),
            })),
            panic_policy,
        }
    }

    /// Name recorded as the `store` field on every event this notifier
    /// and its subscriptions emit.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.registry.borrow_mut().label = Rc::from(label.into());
        self
    }

    pub fn label(&self) -> Rc<str> {
        Rc::clone(&self.registry.borrow().label)
    }

    /// Append a callback to the subscriber list.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId::new();
        let mut registry = self.registry.borrow_mut();
        registry.push(id, Rc::new(callback));
        tracing::trace!(store = registry.label(), subscription = %id, "subscriber added");
        drop(registry);
        Subscription::new(id, Rc::downgrade(&self.registry))
    }

    /// Deliver `value` to every subscriber registered when the call starts.
    ///
    /// With [`SubscriberPanicPolicy::Propagate`] a panicking callback
    /// unwinds out of this call and later subscribers are skipped. With
    /// [`SubscriberPanicPolicy::IsolateAndLog`] the panic is logged and
    /// delivery continues.
    pub fn publish(&self, value: &T) {
        let (snapshot, label) = {
            let registry = self.registry.borrow();
            (registry.snapshot(), Rc::clone(&registry.label))
        };
        let store = &*label;
        tracing::trace!(store, subscribers = snapshot.len(), "publishing");

        for (id, callback) in snapshot {
            match self.panic_policy {
                SubscriberPanicPolicy::Propagate => callback(value),
                SubscriberPanicPolicy::IsolateAndLog => {
                    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(value)))
                    {
                        tracing::error!(
                            store,
                            subscription = %id,
                            panic = panic_message(payload.as_ref()),
                            "subscriber panicked"
                        );
                    }
                }
            }
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn panic_policy(&self) -> SubscriberPanicPolicy {
        self.panic_policy
    }
}

impl<T> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("label", &self.registry.borrow().label)
            .field("subscribers", &self.registry.borrow().entries.len())
            .field("panic_policy", &self.panic_policy)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::capture_logs;
    use std::cell::Cell;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn publish_reaches_subscribers_in_order() {
        let notifier = Notifier::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            let _ = notifier.subscribe(move |value: &i32| order.borrow_mut().push((tag, *value)));
        }

        notifier.publish(&7);

        assert_eq!(
            *order.borrow(),
            vec![("first", 7), ("second", 7), ("third", 7)]
        );
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let notifier: Notifier<String> = Notifier::new();

        notifier.publish(&"nobody".to_string());

        assert!(notifier.is_empty());
    }

    #[test]
    fn unsubscribe_removes_only_its_registration() {
        let notifier = Notifier::new();
        let (seen_a, a) = recorder::<i32>();
        let (seen_b, b) = recorder::<i32>();

        let sub_a = notifier.subscribe(a);
        let _sub_b = notifier.subscribe(b);

        notifier.publish(&1);
        assert!(sub_a.unsubscribe());
        notifier.publish(&2);

        assert_eq!(*seen_a.borrow(), vec![1]);
        assert_eq!(*seen_b.borrow(), vec![1, 2]);
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn double_unsubscribe_is_noop() {
        let notifier: Notifier<i32> = Notifier::new();
        let subscription = notifier.subscribe(|_| {});

        assert!(subscription.unsubscribe());
        assert!(!subscription.unsubscribe());
        assert!(!subscription.is_active());
    }

    #[test]
    fn duplicate_registrations_are_independent() {
        let notifier = Notifier::new();
        let calls = Rc::new(Cell::new(0));
        let callback: Rc<dyn Fn(&i32)> = {
            let calls = Rc::clone(&calls);
            Rc::new(move |_| calls.set(calls.get() + 1))
        };

        let first = {
            let callback = Rc::clone(&callback);
            notifier.subscribe(move |v| callback(v))
        };
        let second = {
            let callback = Rc::clone(&callback);
            notifier.subscribe(move |v| callback(v))
        };
        assert_ne!(first.id(), second.id());

        notifier.publish(&0);
        assert_eq!(calls.get(), 2);

        first.unsubscribe();
        notifier.publish(&0);
        assert_eq!(calls.get(), 3);
        assert!(second.is_active());
    }

    #[test]
    fn unsubscribe_during_publish_uses_snapshot() {
        let notifier = Rc::new(Notifier::new());
        let (seen_late, late) = recorder::<i32>();
        let late_slot: Rc<RefCell<Option<Subscription<i32>>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&late_slot);
        let _remover = notifier.subscribe(move |_: &i32| {
            if let Some(subscription) = slot.borrow().as_ref() {
                subscription.unsubscribe();
            }
        });
        *late_slot.borrow_mut() = Some(notifier.subscribe(late));

        // The removal lands mid-publish, so the snapshot still reaches `late`.
        notifier.publish(&1);
        notifier.publish(&2);

        assert_eq!(*seen_late.borrow(), vec![1]);
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn subscribe_during_publish_waits_for_next_publish() {
        let notifier = Rc::new(Notifier::new());
        let (seen, record) = recorder::<i32>();
        let record = Rc::new(record);
        let added = Rc::new(Cell::new(false));

        let inner = Rc::clone(&notifier);
        let _adder = notifier.subscribe({
            let added = Rc::clone(&added);
            move |_: &i32| {
                if !added.replace(true) {
                    let record = Rc::clone(&record);
                    let _ = inner.subscribe(move |v| record(v));
                }
            }
        });

        notifier.publish(&1);
        notifier.publish(&2);

        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn guard_unsubscribes_on_drop() {
        let notifier = Notifier::new();
        let (seen, record) = recorder::<i32>();

        {
            let _guard = notifier.subscribe(record).into_guard();
            notifier.publish(&1);
        }
        notifier.publish(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert!(notifier.is_empty());
    }

    #[test]
    fn released_guard_keeps_registration() {
        let notifier: Notifier<i32> = Notifier::new();

        let subscription = notifier.subscribe(|_| {}).into_guard().release();

        assert!(subscription.is_active());
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn handle_outliving_notifier_is_inert() {
        let notifier: Notifier<i32> = Notifier::new();
        let subscription = notifier.subscribe(|_| {});

        drop(notifier);

        assert!(!subscription.is_active());
        assert!(!subscription.unsubscribe());
    }

    #[test]
    fn propagate_policy_stops_at_panicking_subscriber() {
        let notifier = Notifier::new();
        let (seen, record) = recorder::<i32>();
        let _boom = notifier.subscribe(|_: &i32| panic!("boom"));
        let _after = notifier.subscribe(record);

        let result = panic::catch_unwind(AssertUnwindSafe(|| notifier.publish(&1)));

        assert!(result.is_err());
        assert!(seen.borrow().is_empty());
        // The registry is not left borrowed after the unwind.
        assert_eq!(notifier.len(), 2);
    }

    #[test]
    fn isolate_policy_continues_after_panic() {
        let notifier = Notifier::with_panic_policy(SubscriberPanicPolicy::IsolateAndLog);
        let (seen, record) = recorder::<i32>();
        let _boom = notifier.subscribe(|_: &i32| panic!("boom"));
        let _after = notifier.subscribe(record);

        notifier.publish(&1);

        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn panic_message_extracts_strings() {
        let static_str: Box<dyn std::any::Any + Send> = Box::new("static");
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        let other: Box<dyn std::any::Any + Send> = Box::new(42_u8);

        assert_eq!(panic_message(static_str.as_ref()), "static");
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn events_carry_notifier_label() {
        let ((), logs) = capture_logs(|| {
            let notifier = Notifier::with_panic_policy(SubscriberPanicPolicy::IsolateAndLog)
                .with_label("inbox");
            let subscription = notifier.subscribe(|_: &i32| panic!("boom"));
            notifier.publish(&1);
            subscription.unsubscribe();
        });

        let lines = logs.lines();
        assert_eq!(lines.len(), 4, "{lines:?}");
        for line in &lines {
            assert!(line.contains(r#"store="inbox""#), "unlabeled event: {line}");
        }
        let errors = logs.at_level("ERROR");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains(r#"panic="boom""#));
    }

    #[test]
    fn unlabeled_notifier_uses_default_label() {
        let notifier: Notifier<i32> = Notifier::new();

        assert_eq!(&*notifier.label(), DEFAULT_LABEL);
    }
}
