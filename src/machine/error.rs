//! The error returned when a machine cannot make a requested move.

use thiserror::Error;

const MESSAGE: &str = "Transition not valid from current state.";

/// A transition was requested that is not registered from the current state.
///
/// Displays as the fixed message `"Transition not valid from current state."`.
/// The attempted transition and the state the machine was in are available
/// for diagnostics but are not part of the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidTransition {
    message: String,
    transition: String,
    state: String,
}

impl InvalidTransition {
    pub(crate) fn new(transition: &str, state: &str) -> Self {
        Self {
            message: MESSAGE.to_string(),
            transition: transition.to_string(),
            state: state.to_string(),
        }
    }

    /// The fixed, human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Name of the transition that was attempted.
    pub fn transition(&self) -> &str {
        &self.transition
    }

    /// Name of the state the machine was in.
    pub fn state(&self) -> &str {
        &self.state
    }
}
