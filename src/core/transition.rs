//! Named transitions between states.

use super::emitter::Emitter;
use super::state::State;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Event emitted by [`Transition::transition`].
pub const TRANSITION: &str = "transition";

/// Payload of a transition's own `"transition"` event.
#[derive(Clone, Debug)]
pub struct TransitionEvent {
    pub from: State,
    pub to: State,
    pub args: Vec<Value>,
}

/// Normalized, never-empty list of source states.
///
/// Built from a single state, any sequence of states, or `None`. A missing or
/// empty source list becomes `[State::uninitialized()]`.
#[derive(Clone, Debug)]
pub struct Sources(Vec<State>);

impl Sources {
    fn normalized(states: Vec<State>) -> Self {
        if states.is_empty() {
            Self(vec![State::uninitialized()])
        } else {
            Self(states)
        }
    }

    /// The source states, in the order given.
    pub fn as_slice(&self) -> &[State] {
        &self.0
    }
}

impl Default for Sources {
    fn default() -> Self {
        Self::normalized(Vec::new())
    }
}

impl From<State> for Sources {
    fn from(state: State) -> Self {
        Self(vec![state])
    }
}

impl From<&State> for Sources {
    fn from(state: &State) -> Self {
        Self(vec![state.clone()])
    }
}

impl From<Option<State>> for Sources {
    fn from(state: Option<State>) -> Self {
        Self::normalized(state.into_iter().collect())
    }
}

impl From<Vec<State>> for Sources {
    fn from(states: Vec<State>) -> Self {
        Self::normalized(states)
    }
}

impl From<&[State]> for Sources {
    fn from(states: &[State]) -> Self {
        Self::normalized(states.to_vec())
    }
}

impl<const N: usize> From<[State; N]> for Sources {
    fn from(states: [State; N]) -> Self {
        Self::normalized(states.into())
    }
}

struct TransitionInner {
    name: String,
    from: Sources,
    to: Option<State>,
    events: Emitter<TransitionEvent>,
}

/// A named edge from one or more source states to a single target.
///
/// The name is both the lookup key in a [`Monster`](crate::Monster)'s table
/// and the event that machine emits when the transition fires. Like
/// [`State`], a transition is a shared handle: clones share listeners.
///
/// # Example
///
/// ```rust
/// use monster::{State, Transition};
///
/// let locked = State::new("locked");
/// let unlocked = State::new("unlocked");
///
/// let unlock = Transition::new("unlock", locked.clone(), unlocked.clone());
/// assert_eq!(unlock.name(), "unlock");
/// assert_eq!(unlock.from()[0].name(), "locked");
///
/// let start = Transition::from_uninitialized("start", locked);
/// assert!(start.from()[0].is_uninitialized());
/// ```
#[derive(Clone)]
pub struct Transition {
    inner: Arc<TransitionInner>,
}

impl Transition {
    /// Create a transition from `from` to `to`.
    pub fn new(name: impl Into<String>, from: impl Into<Sources>, to: State) -> Self {
        Self::with_target(name, from, Some(to))
    }

    /// Create a transition whose source is the uninitialized state.
    pub fn from_uninitialized(name: impl Into<String>, to: State) -> Self {
        Self::with_target(name, Sources::default(), Some(to))
    }

    /// Create a transition with an optional target.
    ///
    /// A transition without a target can be registered but never fires.
    pub fn with_target(
        name: impl Into<String>,
        from: impl Into<Sources>,
        to: Option<State>,
    ) -> Self {
        Self {
            inner: Arc::new(TransitionInner {
                name: name.into(),
                from: from.into(),
                to,
                events: Emitter::new(),
            }),
        }
    }

    /// Name used as the table key and the machine event.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Source states, never empty.
    pub fn from(&self) -> &[State] {
        self.inner.from.as_slice()
    }

    /// Target state, if one was given.
    pub fn to(&self) -> Option<&State> {
        self.inner.to.as_ref()
    }

    /// Whether `a` and `b` are handles to the same transition object.
    pub fn same(a: &Transition, b: &Transition) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Perform a single hop: leave `from`, emit `"transition"`, enter `to`.
    ///
    /// The hop is unconditional. Whether it is legal is for the caller to
    /// decide; `args` reach all three notifications.
    pub fn transition(&self, from: &State, to: &State, args: &[Value]) {
        tracing::debug!(
            transition = %self.name(),
            from = %from.name(),
            to = %to.name(),
            "performing hop"
        );

        from.leave(args);
        self.inner.events.emit(
            TRANSITION,
            &TransitionEvent {
                from: from.clone(),
                to: to.clone(),
                args: args.to_vec(),
            },
        );
        to.enter(args);
    }

    /// Register a `"transition"` listener.
    pub fn on_transition<F>(&self, listener: F)
    where
        F: Fn(&TransitionEvent) + Send + Sync + 'static,
    {
        self.inner.events.on(TRANSITION, listener);
    }

    /// The transition's emitter, for listener bookkeeping.
    pub fn events(&self) -> &Emitter<TransitionEvent> {
        &self.inner.events
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transition: {}", self.name())
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name())
            .field("from", &self.from())
            .field("to", &self.to())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{ENTER, LEAVE};
    use std::sync::Mutex;

    #[test]
    fn single_source_is_wrapped() {
        let a = State::new("a");
        let t = Transition::new("go", a.clone(), State::new("b"));

        assert_eq!(t.from().len(), 1);
        assert!(State::same(&t.from()[0], &a));
    }

    #[test]
    fn sequence_of_sources_is_kept_in_order() {
        let a = State::new("a");
        let b = State::new("b");
        let t = Transition::new("reset", [a.clone(), b.clone()], State::new("c"));

        let names: Vec<&str> = t.from().iter().map(State::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn missing_sources_default_to_uninitialized() {
        let to = State::new("ready");

        let omitted = Transition::from_uninitialized("boot", to.clone());
        let none = Transition::new("boot", None::<State>, to.clone());
        let empty = Transition::new("boot", Vec::<State>::new(), to);

        for t in [omitted, none, empty] {
            assert_eq!(t.from().len(), 1);
            assert!(t.from()[0].is_uninitialized());
        }
    }

    #[test]
    fn transition_without_target_is_accepted() {
        let t = Transition::with_target("dangling", State::new("a"), None);
        assert!(t.to().is_none());
    }

    #[test]
    fn hop_fires_leave_then_transition_then_enter() {
        let s1 = State::new("s1");
        let s2 = State::new("s2");
        let t = Transition::new("go", s1.clone(), s2.clone());
        let log = Arc::new(Mutex::new(Vec::<String>::new()));

        let sink = Arc::clone(&log);
        s1.on(LEAVE, move |args: &[Value]| {
            sink.lock().unwrap().push(format!("leave s1 {args:?}"));
        });
        let sink = Arc::clone(&log);
        t.on_transition(move |event: &TransitionEvent| {
            sink.lock().unwrap().push(format!(
                "transition {} -> {} {:?}",
                event.from.name(),
                event.to.name(),
                event.args
            ));
        });
        let sink = Arc::clone(&log);
        s2.on(ENTER, move |args: &[Value]| {
            sink.lock().unwrap().push(format!("enter s2 {args:?}"));
        });

        t.transition(&s1, &s2, &[Value::from("payload")]);

        let payload = format!("{:?}", vec![Value::from("payload")]);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                format!("leave s1 {payload}"),
                format!("transition s1 -> s2 {payload}"),
                format!("enter s2 {payload}"),
            ]
        );
    }

    #[test]
    fn hop_uses_given_states_not_declared_ones() {
        let declared_to = State::new("declared");
        let actual_from = State::new("x");
        let actual_to = State::new("y");
        let t = Transition::new("go", State::new("w"), declared_to.clone());

        let declared_entered = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&declared_entered);
        declared_to.on_enter(move |_args: &[Value]| *sink.lock().unwrap() += 1);
        let actual_entered = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&actual_entered);
        actual_to.on_enter(move |_args: &[Value]| *sink.lock().unwrap() += 1);

        t.transition(&actual_from, &actual_to, &[]);

        assert_eq!(*declared_entered.lock().unwrap(), 0);
        assert_eq!(*actual_entered.lock().unwrap(), 1);
    }

    #[test]
    fn display_renders_name() {
        let t = Transition::new("go", State::new("a"), State::new("b"));
        assert_eq!(t.to_string(), "Transition: go");
    }
}
