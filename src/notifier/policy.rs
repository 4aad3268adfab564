//! Handling of subscriber panics during a publish.

use serde::{Deserialize, Serialize};

/// What happens when a subscriber panics during a publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriberPanicPolicy {
    /// Unwind out of `publish` (and `dispatch`); later subscribers are skipped
    #[default]
    Propagate,

    /// Catch the panic, log it and keep notifying the remaining subscribers.
    ///
    /// The process panic hook still runs before the panic is caught, so
    /// with the default hook each isolated panic also prints
    /// `thread '…' panicked at …` to stderr, outside of `tracing`. Install
    /// a custom hook with [`std::panic::set_hook`] to silence it.
    IsolateAndLog,
}
