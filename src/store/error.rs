//! Dispatch errors.

use thiserror::Error;

/// Errors returned by [`Store::dispatch`](super::Store::dispatch).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No action is registered under the requested name. The state is
    /// unchanged and no subscriber was notified.
    #[error("Action \"{name}\" is not defined.")]
    UnknownAction { name: String },
}

impl DispatchError {
    /// Name of the action the dispatch asked for.
    pub fn action_name(&self) -> &str {
        match self {
            Self::UnknownAction { name } => name,
        }
    }
}
