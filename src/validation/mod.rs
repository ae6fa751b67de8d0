//! Accumulating checks for machine definitions.
//!
//! A [`Monster`](crate::Monster) accepts any set of transitions: names may
//! collide, targets may be missing, later registrations silently replace
//! earlier ones. This module reports all of those at once using
//! `stillwater`'s `Validation`, so a definition can be fixed in one pass.
//!
//! # Example
//!
//! ```rust
//! use monster::{Monster, State, Transition};
//!
//! let a = State::new("a");
//! let mut machine = Monster::with_state(a.clone(), &[]);
//! machine
//!     .add_transition(Transition::new("go", a.clone(), State::new("b")))
//!     .add_transition(Transition::new("go", a, State::new("c")));
//!
//! assert!(machine.validate().is_failure());
//! ```

pub mod rules;
pub mod violations;

pub use rules::validate;
pub use violations::Violation;
