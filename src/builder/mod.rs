//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders for transitions and machines, and
//! the [`shortcuts!`](crate::shortcuts) macro for calling transitions as
//! methods.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::MonsterBuilder;
pub use transition::TransitionBuilder;

use crate::core::{State, Transition};

/// Create a transition from a single source to a target.
///
/// # Example
///
/// ```
/// use monster::builder::simple_transition;
/// use monster::State;
///
/// let transition = simple_transition("start", State::new("idle"), State::new("running"));
/// assert_eq!(transition.name(), "start");
/// ```
pub fn simple_transition(name: impl Into<String>, from: State, to: State) -> Transition {
    Transition::new(name, from, to)
}

/// Create one transition per (source, target) pair, all sharing `name`.
///
/// Useful for an event like `"next"` that moves a different way from each
/// state.
///
/// # Example
///
/// ```
/// use monster::builder::{cycle, MonsterBuilder};
/// use monster::State;
///
/// let red = State::new("red");
/// let green = State::new("green");
///
/// let mut light = MonsterBuilder::new()
///     .initial(red.clone())
///     .transitions(cycle("next", &[red.clone(), green.clone()]))
///     .build()
///     .unwrap();
///
/// light.transition("next", &[]).unwrap();
/// assert!(State::same(light.state(), &green));
/// light.transition("next", &[]).unwrap();
/// assert!(State::same(light.state(), &red));
/// ```
pub fn cycle(name: &str, states: &[State]) -> Vec<Transition> {
    states
        .iter()
        .zip(states.iter().cycle().skip(1))
        .map(|(from, to)| Transition::new(name, from.clone(), to.clone()))
        .collect()
}
