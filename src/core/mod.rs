//! Core building blocks: event emitters, states, transitions and history.
//!
//! - `Emitter` gives every entity name-keyed, synchronous notifications
//! - `State` is a named node with enter/leave notifications
//! - `Transition` is a named edge that can perform a leave/notify/enter hop
//! - `History` records what a machine has done

mod emitter;
mod history;
mod state;
mod transition;

pub use emitter::{Emitter, Listener};
pub use history::{History, TransitionRecord};
pub use state::{State, ENTER, LEAVE};
pub use transition::{Sources, Transition, TransitionEvent, TRANSITION};
