//! Runtime configuration for a store.

use crate::notifier::{SubscriberPanicPolicy, DEFAULT_LABEL};
use serde::{Deserialize, Serialize};

/// Store configuration.
///
/// Every field has a default, so partial documents deserialize:
///
/// ```rust
/// use statehub::store::{StoreConfig, SubscriberPanicPolicy};
///
/// let config: StoreConfig =
///     serde_json::from_str(r#"{ "subscriber_panics": "isolate_and_log" }"#).unwrap();
///
/// assert_eq!(config.subscriber_panics, SubscriberPanicPolicy::IsolateAndLog);
/// assert_eq!(config.label, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name attached to every log event emitted by the store
    pub label: Option<String>,

    pub subscriber_panics: SubscriberPanicPolicy,
}

impl StoreConfig {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_panic_policy(mut self, policy: SubscriberPanicPolicy) -> Self {
        self.subscriber_panics = policy;
        self
    }

    pub(crate) fn label_or_default(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }
}
