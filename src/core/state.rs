//! Named states with enter/leave notifications.
//!
//! A [`State`] is a shared handle: cloning it yields another reference to the
//! same logical state, and listeners registered through any clone fire for
//! every machine or transition that uses it.

use super::emitter::Emitter;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Event emitted by [`State::enter`].
pub const ENTER: &str = "enter";

/// Event emitted by [`State::leave`].
pub const LEAVE: &str = "leave";

static UNINITIALIZED: LazyLock<State> = LazyLock::new(|| State::new("uninitialized"));

struct StateInner {
    name: String,
    events: Emitter<[Value]>,
}

/// A named node of a state machine.
///
/// States are compared by identity with [`State::same`]; transition tables
/// key them by [`State::name`], so two distinct states sharing a name occupy
/// the same table row.
///
/// # Example
///
/// ```rust
/// use monster::{State, Value};
/// use std::sync::{Arc, Mutex};
///
/// let open = State::new("open");
/// let entered = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&entered);
/// open.on_enter(move |args: &[Value]| sink.lock().unwrap().extend_from_slice(args));
///
/// open.enter(&[Value::from("visitor")]);
/// assert_eq!(*entered.lock().unwrap(), vec![Value::from("visitor")]);
/// ```
#[derive(Clone)]
pub struct State {
    inner: Arc<StateInner>,
}

impl State {
    /// Create a new, distinct state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(StateInner {
                name: name.into(),
                events: Emitter::new(),
            }),
        }
    }

    /// The process-wide default state, named `"uninitialized"`.
    ///
    /// It is the initial state of a machine built without one and the
    /// source of a transition declared without one.
    pub fn uninitialized() -> Self {
        UNINITIALIZED.clone()
    }

    /// The state's name, used as its transition-table key.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether `a` and `b` are handles to the same state object.
    pub fn same(a: &State, b: &State) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Whether this is the shared uninitialized state.
    pub fn is_uninitialized(&self) -> bool {
        Self::same(self, &UNINITIALIZED)
    }

    /// Notify `"enter"` listeners, forwarding `args`.
    pub fn enter(&self, args: &[Value]) {
        self.inner.events.emit(ENTER, args);
    }

    /// Notify `"leave"` listeners, forwarding `args`.
    pub fn leave(&self, args: &[Value]) {
        self.inner.events.emit(LEAVE, args);
    }

    /// Register a listener for an arbitrary event name on this state.
    pub fn on<F>(&self, event: impl Into<String>, listener: F)
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.inner.events.on(event, listener);
    }

    /// Register an `"enter"` listener.
    pub fn on_enter<F>(&self, listener: F)
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.on(ENTER, listener);
    }

    /// Register a `"leave"` listener.
    pub fn on_leave<F>(&self, listener: F)
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.on(LEAVE, listener);
    }

    /// The state's emitter, for listener bookkeeping.
    pub fn events(&self) -> &Emitter<[Value]> {
        &self.inner.events
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State: {}", self.name())
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("State").field(&self.name()).finish()
    }
}
