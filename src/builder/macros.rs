//! Macros for ergonomic machine driving.

/// Generate a trait with one method per transition name, implemented for
/// [`Monster`](crate::Monster).
///
/// Each method forwards to `Monster::transition` with its own name, so
/// `machine.open(&[])` is `machine.transition("open", &[])`. Inherent
/// `Monster` methods win over generated ones of the same name.
///
/// # Example
///
/// ```
/// use monster::{shortcuts, Monster, State, Transition};
///
/// shortcuts! {
///     pub trait DoorMoves {
///         open,
///         close,
///     }
/// }
///
/// let closed = State::new("closed");
/// let open = State::new("open");
/// let mut door = Monster::with_state(closed.clone(), &[]);
/// door.add_transition(Transition::new("open", closed.clone(), open.clone()))
///     .add_transition(Transition::new("close", open, closed.clone()));
///
/// door.open(&[]).unwrap().close(&[]).unwrap();
/// assert!(State::same(door.state(), &closed));
/// ```
#[macro_export]
macro_rules! shortcuts {
    (
        $(#[$meta:meta])*
        $vis:vis trait $name:ident {
            $(
                $(#[$method_meta:meta])*
                $method:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis trait $name {
            $(
                $(#[$method_meta])*
                fn $method(
                    &mut self,
                    args: &[$crate::Value],
                ) -> ::std::result::Result<&mut Self, $crate::InvalidTransition>;
            )*
        }

        impl $name for $crate::Monster {
            $(
                fn $method(
                    &mut self,
                    args: &[$crate::Value],
                ) -> ::std::result::Result<&mut Self, $crate::InvalidTransition> {
                    self.transition(stringify!($method), args)
                }
            )*
        }
    };
}
