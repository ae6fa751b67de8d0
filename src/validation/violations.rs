//! Problems found in a machine definition.

use thiserror::Error;

/// A problem with a set of registered transitions.
///
/// None of these stop a [`Monster`](crate::Monster) from running; they flag
/// definitions whose behavior is likely not what the author meant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("{count} distinct states share the name '{name}'")]
    NameCollision { name: String, count: usize },

    #[error("Transition '{transition}' has no target state")]
    MissingTarget { transition: String },

    #[error("Transition '{transition}' from '{state}' is registered with different targets")]
    Overwritten { transition: String, state: String },
}
