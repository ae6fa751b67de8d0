//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{State, Transition};

/// Builder for constructing transitions with a fluent API.
///
/// Sources accumulate across `.from()` / `.from_many()` calls; none at all
/// means the uninitialized state. The target is optional: a transition
/// without one registers fine but never fires.
#[derive(Default)]
pub struct TransitionBuilder {
    name: Option<String>,
    from: Vec<State>,
    to: Option<State>,
}

impl TransitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transition name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a source state.
    pub fn from(mut self, state: State) -> Self {
        self.from.push(state);
        self
    }

    /// Add several source states.
    pub fn from_many(mut self, states: impl IntoIterator<Item = State>) -> Self {
        self.from.extend(states);
        self
    }

    /// Set the target state.
    pub fn to(mut self, state: State) -> Self {
        self.to = Some(state);
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, BuildError> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or(BuildError::MissingName)?;

        Ok(Transition::with_target(name, self.from, self.to))
    }
}
