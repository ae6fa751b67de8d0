//! Definition checks, accumulated with `Validation`.

use crate::core::{State, Transition};
use crate::validation::violations::Violation;
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<Violation>>;

/// Check a set of transitions, accumulating ALL violations.
///
/// Returns `Validation::Success(())` when the definition is clean, otherwise
/// `Validation::Failure` with every violation found:
///
/// - distinct states (including the uninitialized state) sharing a name
/// - transitions without a target
/// - a (source name, transition name) pair registered with different targets
///
/// # Example
///
/// ```rust
/// use monster::validation::{validate, Violation};
/// use monster::{State, Transition};
/// use stillwater::validation::Validation;
///
/// let a = State::new("a");
/// let clean = vec![Transition::new("go", a.clone(), State::new("b"))];
/// assert!(validate(&clean).is_success());
///
/// let twins = vec![Transition::new("go", a, State::new("a"))];
/// match validate(&twins) {
///     Validation::Failure(violations) => assert!(violations
///         .iter()
///         .any(|v| matches!(v, Violation::NameCollision { .. }))),
///     Validation::Success(_) => panic!("expected a name collision"),
/// }
/// ```
pub fn validate(transitions: &[Transition]) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    checks.extend(unique_state_names(transitions));
    checks.extend(targets_present(transitions));
    checks.extend(no_conflicting_entries(transitions));

    Validation::all_vec(checks).map(|_| ())
}

fn unique_state_names(transitions: &[Transition]) -> Vec<Check> {
    let mut by_name: BTreeMap<String, Vec<State>> = BTreeMap::new();
    let declared = transitions
        .iter()
        .flat_map(|t| t.from().iter().cloned().chain(t.to().cloned()));
    let referenced = std::iter::once(State::uninitialized()).chain(declared);

    for state in referenced {
        let handles = by_name.entry(state.name().to_string()).or_default();
        if !handles.iter().any(|known| State::same(known, &state)) {
            handles.push(state);
        }
    }

    by_name
        .into_iter()
        .map(|(name, handles)| {
            if handles.len() > 1 {
                Validation::fail(Violation::NameCollision {
                    name,
                    count: handles.len(),
                })
            } else {
                Validation::success(())
            }
        })
        .collect()
}

fn targets_present(transitions: &[Transition]) -> Vec<Check> {
    transitions
        .iter()
        .map(|t| {
            if t.to().is_some() {
                Validation::success(())
            } else {
                Validation::fail(Violation::MissingTarget {
                    transition: t.name().to_string(),
                })
            }
        })
        .collect()
}

fn no_conflicting_entries(transitions: &[Transition]) -> Vec<Check> {
    let mut entries: BTreeMap<(String, String), Option<State>> = BTreeMap::new();
    let mut checks = Vec::new();

    for t in transitions {
        for source in t.from() {
            let key = (source.name().to_string(), t.name().to_string());
            let target = t.to().cloned();
            let check = match entries.get(&key) {
                Some(previous) if !same_target(previous, &target) => {
                    Validation::fail(Violation::Overwritten {
                        transition: key.1.clone(),
                        state: key.0.clone(),
                    })
                }
                _ => Validation::success(()),
            };
            checks.push(check);
            entries.insert(key, target);
        }
    }

    checks
}

fn same_target(a: &Option<State>, b: &Option<State>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => State::same(a, b),
        (None, None) => true,
        _ => false,
    }
}
