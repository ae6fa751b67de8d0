//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{State, Transition};
use crate::machine::Monster;
use crate::validation;
use serde_json::Value;
use stillwater::validation::Validation;

/// Builder for constructing a [`Monster`] with a fluent API.
///
/// Every setting is optional: the defaults give a machine in the
/// uninitialized state with no transitions. In strict mode the collected
/// transitions are validated first and any violation fails the build.
#[derive(Default)]
pub struct MonsterBuilder {
    initial: Option<State>,
    enter_args: Vec<Value>,
    transitions: Vec<Transition>,
    strict: bool,
    history_limit: Option<usize>,
}

impl MonsterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state.
    pub fn initial(mut self, state: State) -> Self {
        self.initial = Some(state);
        self
    }

    /// Arguments forwarded to the initial state's `"enter"` notification.
    pub fn enter_args(mut self, args: impl IntoIterator<Item = Value>) -> Self {
        self.enter_args.extend(args);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Reject definitions with name collisions, missing targets or
    /// conflicting registrations.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Keep only the `limit` most recent moves in the machine's history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Build the machine, entering the initial state.
    ///
    /// Validation runs before the initial state is entered, so a rejected
    /// build fires no notifications.
    pub fn build(self) -> Result<Monster, BuildError> {
        if self.strict {
            if let Validation::Failure(violations) = validation::validate(&self.transitions) {
                return Err(BuildError::Invalid(violations.iter().cloned().collect()));
            }
        }

        let initial = self.initial.unwrap_or_else(State::uninitialized);
        let mut machine = Monster::with_state(initial, &self.enter_args);
        machine.set_history_limit(self.history_limit);
        for transition in self.transitions {
            machine.add_transition(transition);
        }

        Ok(machine)
    }
}
