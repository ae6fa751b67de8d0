//! Build errors for machine and transition builders.

use crate::validation::Violation;
use thiserror::Error;

/// Errors that can occur when building machines and transitions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition name not specified. Call .name(name) before .build()")]
    MissingName,

    #[error("Machine definition has {} violation(s): {}", .0.len(), summary(.0))]
    Invalid(Vec<Violation>),
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
