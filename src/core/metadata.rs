//! Dispatch bookkeeping for a store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters and timestamps tracked by a store.
///
/// Only aggregates are kept; previous state values are never retained.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// When the store was created
    pub created_at: DateTime<Utc>,

    /// Last dispatch attempt, successful or not
    pub updated_at: DateTime<Utc>,

    /// Number of dispatches that replaced the state
    pub dispatched: usize,

    /// Number of dispatches rejected for an unknown action name
    pub rejected: usize,
}

impl Default for StoreMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            dispatched: 0,
            rejected: 0,
        }
    }
}

impl StoreMetadata {
    pub(crate) fn record_dispatch(&mut self) {
        self.dispatched += 1;
        self.updated_at = Utc::now();
    }

    pub(crate) fn record_rejection(&mut self) {
        self.rejected += 1;
        self.updated_at = Utc::now();
    }

    /// Total dispatch attempts.
    pub fn attempts(&self) -> usize {
        self.dispatched + self.rejected
    }
}
