//! The state machine: current state, transition table and machine events.

use crate::core::{Emitter, History, State, Transition, TransitionRecord, TRANSITION};
use crate::machine::error::InvalidTransition;
use crate::validation::{self, Violation};
use chrono::Utc;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Event emitted after a move lands on a state with no outgoing transitions.
pub const FINAL: &str = "final";

/// Payload of the events a [`Monster`] emits.
///
/// A successful move emits, in order: `"transition"` with
/// [`MonsterEvent::Transition`], an event named after the transition with
/// [`MonsterEvent::Fired`], and `"final"` with [`MonsterEvent::Final`] when
/// the new state is final.
#[derive(Clone, Debug)]
pub enum MonsterEvent {
    /// The machine moved between two states
    Transition { from: State, to: State },

    /// A named transition fired with the caller's arguments
    Fired { name: String, args: Vec<Value> },

    /// The machine reached a final state
    Final { state: State },
}

/// Invocation wrapper installed for every registered transition name.
///
/// `shortcut.call(&mut monster, args)` is `monster.transition(name, args)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcut {
    name: String,
}

impl Shortcut {
    /// Name of the transition this shortcut fires.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fire the transition on `monster`, as [`Monster::transition`] does.
    pub fn call<'m>(
        &self,
        monster: &'m mut Monster,
        args: &[Value],
    ) -> Result<&'m mut Monster, InvalidTransition> {
        monster.transition(&self.name, args)
    }
}

/// Row of the transition table: transition name to target.
///
/// A `None` target comes from a transition declared without one.
type Row = BTreeMap<String, Option<State>>;

/// A finite state machine driven by named transitions.
///
/// The transition table is keyed by state *name*: a state is final exactly
/// when no transition was ever registered with a source of that name.
/// Moving through [`Monster::transition`] emits the machine's own events; it
/// does not call the states' enter/leave hooks, which only
/// [`Transition::transition`] drives.
///
/// # Example
///
/// ```rust
/// use monster::{Monster, State, Transition};
///
/// let a = State::new("a");
/// let b = State::new("b");
///
/// let mut machine = Monster::with_state(a.clone(), &[]);
/// machine.add_transition(Transition::new("go", a, b.clone()));
/// assert!(!machine.is_final());
///
/// machine.transition("go", &[]).unwrap();
/// assert!(State::same(machine.state(), &b));
/// assert!(machine.is_final());
///
/// let err = machine.transition("go", &[]).unwrap_err();
/// assert_eq!(err.to_string(), "Transition not valid from current state.");
/// ```
pub struct Monster {
    state: State,
    table: HashMap<String, Row>,
    transitions: Vec<Transition>,
    shortcuts: BTreeMap<String, Shortcut>,
    history: History,
    events: Emitter<MonsterEvent>,
}

impl Monster {
    /// Create a machine in the uninitialized state.
    pub fn new() -> Self {
        Self::with_state(State::uninitialized(), &[])
    }

    /// Create a machine in `initial`, entering it with `enter_args`.
    ///
    /// The initial state's `"enter"` listeners run before this returns.
    pub fn with_state(initial: State, enter_args: &[Value]) -> Self {
        tracing::debug!(state = %initial.name(), "starting machine");
        initial.enter(enter_args);

        Self {
            state: initial,
            table: HashMap::new(),
            transitions: Vec::new(),
            shortcuts: BTreeMap::new(),
            history: History::new(),
            events: Emitter::new(),
        }
    }

    /// Register a transition.
    ///
    /// Each source name gains a table entry for the transition's name; an
    /// existing entry for the same (source, name) pair is replaced. A
    /// shortcut named after the transition is installed as well.
    pub fn add_transition(&mut self, transition: Transition) -> &mut Self {
        let name = transition.name().to_string();

        for source in transition.from() {
            let row = self.table.entry(source.name().to_string()).or_default();
            let target = transition.to().cloned();
            if let Some(previous) = row.insert(name.clone(), target) {
                tracing::debug!(
                    transition = %name,
                    source = %source.name(),
                    previous = ?previous.as_ref().map(State::name),
                    "replacing table entry"
                );
            }
        }

        tracing::debug!(
            transition = %name,
            sources = transition.from().len(),
            target = ?transition.to().map(State::name),
            "registered transition"
        );

        self.shortcuts.insert(name.clone(), Shortcut { name });
        self.transitions.push(transition);
        self
    }

    /// Move along the transition `name`, forwarding `args` to its event.
    ///
    /// Fails without any state change or event when the current state is
    /// final or has no transition called `name`.
    pub fn transition(
        &mut self,
        name: &str,
        args: &[Value],
    ) -> Result<&mut Self, InvalidTransition> {
        let target = self.target(name).cloned().ok_or_else(|| {
            tracing::debug!(
                transition = name,
                state = %self.state.name(),
                "rejected transition"
            );
            InvalidTransition::new(name, self.state.name())
        })?;

        let from = std::mem::replace(&mut self.state, target.clone());
        self.history.push(TransitionRecord {
            transition: name.to_string(),
            from: from.name().to_string(),
            to: target.name().to_string(),
            timestamp: Utc::now(),
        });

        tracing::debug!(
            transition = name,
            from = %from.name(),
            to = %target.name(),
            "transitioned"
        );

        self.events.emit(
            TRANSITION,
            &MonsterEvent::Transition {
                from,
                to: target.clone(),
            },
        );
        self.events.emit(
            name,
            &MonsterEvent::Fired {
                name: name.to_string(),
                args: args.to_vec(),
            },
        );
        if self.is_final() {
            self.events.emit(FINAL, &MonsterEvent::Final { state: target });
        }

        Ok(self)
    }

    /// Whether the current state has no registered outgoing transitions.
    pub fn is_final(&self) -> bool {
        !self.table.contains_key(self.state.name())
    }

    /// Whether `transition(name, ..)` would succeed right now.
    pub fn can(&self, name: &str) -> bool {
        self.target(name).is_some()
    }

    /// Names of the transitions that can fire from the current state, sorted.
    pub fn available(&self) -> Vec<&str> {
        self.table
            .get(self.state.name())
            .map(|row| {
                row.iter()
                    .filter(|(_, target)| target.is_some())
                    .map(|(name, _)| name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Every transition registered so far, in registration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Forget every recorded move.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Keep at most `limit` recorded moves, or all of them with `None`.
    pub fn set_history_limit(&mut self, limit: Option<usize>) {
        self.history.set_limit(limit);
    }

    /// The shortcut installed for `name`, if a transition of that name was added.
    pub fn shortcut(&self, name: &str) -> Option<Shortcut> {
        self.shortcuts.get(name).cloned()
    }

    /// Names of all installed shortcuts, sorted.
    pub fn shortcut_names(&self) -> impl Iterator<Item = &str> {
        self.shortcuts.keys().map(String::as_str)
    }

    /// Register a listener for one of the machine's events.
    ///
    /// Events are `"transition"`, `"final"`, and one per transition name. A
    /// transition named `"transition"` or `"final"` shares that event.
    pub fn on<F>(&self, event: impl Into<String>, listener: F)
    where
        F: Fn(&MonsterEvent) + Send + Sync + 'static,
    {
        self.events.on(event, listener);
    }

    /// The machine's emitter, for listener bookkeeping.
    pub fn events(&self) -> &Emitter<MonsterEvent> {
        &self.events
    }

    /// Check the registered transitions for definition problems.
    ///
    /// See [`validation::validate`].
    pub fn validate(&self) -> Validation<(), NonEmptyVec<Violation>> {
        validation::validate(&self.transitions)
    }

    fn target(&self, name: &str) -> Option<&State> {
        self.table.get(self.state.name())?.get(name)?.as_ref()
    }
}

impl Default for Monster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Monster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monster")
            .field("state", &self.state)
            .field("transitions", &self.transitions.len())
            .field("history", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn door() -> (State, State, Monster) {
        let closed = State::new("closed");
        let open = State::new("open");
        let mut machine = Monster::with_state(closed.clone(), &[]);
        machine
            .add_transition(Transition::new("open", closed.clone(), open.clone()))
            .add_transition(Transition::new("close", open.clone(), closed.clone()));
        (closed, open, machine)
    }

    fn event_log(machine: &Monster, events: &[&str]) -> Arc<Mutex<Vec<String>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        for event in events {
            let sink = Arc::clone(&log);
            let label = event.to_string();
            machine.on(*event, move |payload: &MonsterEvent| {
                let line = match payload {
                    MonsterEvent::Transition { from, to } => {
                        format!("{label}: {} -> {}", from.name(), to.name())
                    }
                    MonsterEvent::Fired { name, args } => format!("{label}: {name} {args:?}"),
                    MonsterEvent::Final { state } => format!("{label}: {}", state.name()),
                };
                sink.lock().unwrap().push(line);
            });
        }
        log
    }

    #[test]
    fn new_machine_starts_uninitialized() {
        let machine = Monster::new();
        assert!(machine.state().is_uninitialized());
        assert!(machine.is_final());
    }

    #[test]
    fn construction_enters_initial_state_with_args() {
        let start = State::new("start");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        start.on_enter(move |args: &[Value]| sink.lock().unwrap().push(args.to_vec()));

        let machine = Monster::with_state(start.clone(), &[Value::from(7)]);

        assert!(State::same(machine.state(), &start));
        assert_eq!(*seen.lock().unwrap(), vec![vec![Value::from(7)]]);
    }

    #[test]
    fn transition_moves_to_target() {
        let (_, open, mut machine) = door();

        machine.transition("open", &[]).unwrap();

        assert!(State::same(machine.state(), &open));
    }

    #[test]
    fn transitions_chain() {
        let (closed, _, mut machine) = door();

        machine
            .transition("open", &[])
            .unwrap()
            .transition("close", &[])
            .unwrap();

        assert!(State::same(machine.state(), &closed));
        assert_eq!(machine.history().path(), vec!["closed", "open", "closed"]);
    }

    #[test]
    fn unknown_transition_is_rejected_without_side_effects() {
        let (closed, _, mut machine) = door();
        let log = event_log(&machine, &["transition", "close", "final"]);

        let err = machine.transition("close", &[]).unwrap_err();

        assert_eq!(err.transition(), "close");
        assert_eq!(err.state(), "closed");
        assert!(State::same(machine.state(), &closed));
        assert!(machine.history().is_empty());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn events_fire_in_order() {
        let a = State::new("a");
        let b = State::new("b");
        let mut machine = Monster::with_state(a.clone(), &[]);
        machine.add_transition(Transition::new("go", a, b));
        let log = event_log(&machine, &["transition", "go", "final"]);

        machine.transition("go", &[Value::from("x")]).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "transition: a -> b".to_string(),
                format!("go: go {:?}", vec![Value::from("x")]),
                "final: b".to_string(),
            ]
        );
    }

    #[test]
    fn final_is_not_emitted_for_non_final_targets() {
        let (_, _, mut machine) = door();
        let log = event_log(&machine, &["final"]);

        machine.transition("open", &[]).unwrap();

        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn machine_transition_does_not_drive_state_hooks() {
        let (closed, open, mut machine) = door();
        let hooks = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&hooks);
        closed.on_leave(move |_args: &[Value]| *sink.lock().unwrap() += 1);
        let sink = Arc::clone(&hooks);
        open.on_enter(move |_args: &[Value]| *sink.lock().unwrap() += 1);

        machine.transition("open", &[]).unwrap();

        assert_eq!(*hooks.lock().unwrap(), 0);
    }

    #[test]
    fn last_registration_wins() {
        let a = State::new("a");
        let b = State::new("b");
        let c = State::new("c");
        let mut machine = Monster::with_state(a.clone(), &[]);
        machine
            .add_transition(Transition::new("go", a.clone(), b))
            .add_transition(Transition::new("go", a, c.clone()));

        machine.transition("go", &[]).unwrap();

        assert!(State::same(machine.state(), &c));
    }

    #[test]
    fn table_is_keyed_by_state_name() {
        let a = State::new("a");
        let impostor = State::new("a");
        let b = State::new("b");
        let mut machine = Monster::with_state(impostor.clone(), &[]);
        machine.add_transition(Transition::new("go", a, b.clone()));

        assert!(!machine.is_final());
        machine.transition("go", &[]).unwrap();
        assert!(State::same(machine.state(), &b));
    }

    #[test]
    fn multiple_sources_share_a_transition() {
        let idle = State::new("idle");
        let busy = State::new("busy");
        let off = State::new("off");
        let mut machine = Monster::with_state(busy.clone(), &[]);
        machine.add_transition(Transition::new("halt", [idle, busy], off.clone()));

        assert!(machine.can("halt"));
        machine.transition("halt", &[]).unwrap();
        assert!(State::same(machine.state(), &off));
    }

    #[test]
    fn transition_without_target_never_fires() {
        let a = State::new("a");
        let mut machine = Monster::with_state(a.clone(), &[]);
        machine.add_transition(Transition::with_target("nowhere", a.clone(), None));

        assert!(!machine.is_final());
        assert!(!machine.can("nowhere"));
        assert!(machine.available().is_empty());
        assert!(machine.transition("nowhere", &[]).is_err());
        assert!(State::same(machine.state(), &a));
    }

    #[test]
    fn available_lists_sorted_names() {
        let a = State::new("a");
        let mut machine = Monster::with_state(a.clone(), &[]);
        machine
            .add_transition(Transition::new("zeta", a.clone(), State::new("z")))
            .add_transition(Transition::new("alpha", a, State::new("y")));

        assert_eq!(machine.available(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn shortcut_calls_transition() {
        let (_, open, mut machine) = door();

        let shortcut = machine.shortcut("open").unwrap();
        shortcut.call(&mut machine, &[]).unwrap();

        assert!(State::same(machine.state(), &open));
        assert!(machine.shortcut("missing").is_none());
        assert_eq!(
            machine.shortcut_names().collect::<Vec<_>>(),
            vec!["close", "open"]
        );
    }

    #[test]
    fn history_records_transition_names() {
        let (_, _, mut machine) = door();

        machine.transition("open", &[]).unwrap();

        let record = machine.history().last().unwrap();
        assert_eq!(record.transition, "open");
        assert_eq!(record.from, "closed");
        assert_eq!(record.to, "open");
    }

    #[test]
    fn clear_history_forgets_moves() {
        let (_, _, mut machine) = door();
        machine.transition("open", &[]).unwrap();
        machine.transition("close", &[]).unwrap();

        machine.clear_history();

        assert!(machine.history().is_empty());
        machine.transition("open", &[]).unwrap();
        assert_eq!(machine.history().path(), vec!["closed", "open"]);
    }

    #[test]
    fn history_limit_bounds_recorded_moves() {
        let (_, _, mut machine) = door();
        machine.set_history_limit(Some(2));

        for _ in 0..5 {
            machine.transition("open", &[]).unwrap();
            machine.transition("close", &[]).unwrap();
        }

        assert_eq!(machine.history().len(), 2);
        assert_eq!(machine.history().path(), vec!["closed", "open", "closed"]);
    }
}
