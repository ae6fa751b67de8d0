//! Monster: a small event-driven finite state machine
//!
//! Declare named states, declare named transitions between them, and drive
//! a machine through those transitions while listeners observe every move.
//! Everything is synchronous: a call either completes, with all its
//! notifications delivered, or fails before changing anything.
//!
//! # Core Concepts
//!
//! - **State**: a named node with `"enter"` / `"leave"` notifications
//! - **Transition**: a named edge from one or more states to one target,
//!   able to perform a leave → `"transition"` → enter hop on its own
//! - **Monster**: the machine; holds the current state and a transition
//!   table keyed by state name, and emits `"transition"`, `"final"` and one
//!   event per transition name
//! - **InvalidTransition**: the error for a move not registered from the
//!   current state
//!
//! Listener arguments are [`serde_json::Value`]s, re-exported as [`Value`].
//!
//! # Example
//!
//! ```rust
//! use monster::{Monster, MonsterEvent, State, Transition, Value};
//! use std::sync::{Arc, Mutex};
//!
//! let pending = State::new("pending");
//! let shipped = State::new("shipped");
//! let delivered = State::new("delivered");
//!
//! let mut order = Monster::with_state(pending.clone(), &[]);
//! order
//!     .add_transition(Transition::new("ship", pending, shipped.clone()))
//!     .add_transition(Transition::new("deliver", shipped, delivered.clone()));
//!
//! let finished = Arc::new(Mutex::new(false));
//! let flag = Arc::clone(&finished);
//! order.on("final", move |_event: &MonsterEvent| *flag.lock().unwrap() = true);
//!
//! order.transition("ship", &[Value::from("UPS")]).unwrap();
//! assert!(!*finished.lock().unwrap());
//!
//! order.transition("deliver", &[]).unwrap();
//! assert!(State::same(order.state(), &delivered));
//! assert!(*finished.lock().unwrap());
//!
//! assert!(order.transition("ship", &[]).is_err());
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{Emitter, History, State, Transition, TransitionEvent, TransitionRecord};
pub use builder::{BuildError, MonsterBuilder, TransitionBuilder};
pub use machine::{InvalidTransition, Monster, MonsterEvent, Shortcut};
pub use serde_json::Value;
pub use validation::Violation;

/// The shared default state, named `"uninitialized"`.
pub fn uninitialized() -> State {
    State::uninitialized()
}
