//! The machine that callers drive.
//!
//! A [`Monster`] owns the current state and a name-keyed transition table
//! built from registered [`Transition`](crate::Transition)s. Requests for
//! moves that are not in the table fail with [`InvalidTransition`].

mod error;
mod monster;

pub use error::InvalidTransition;
pub use monster::{Monster, MonsterEvent, Shortcut, FINAL};
