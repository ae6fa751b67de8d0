//! Transition history tracking.
//!
//! Every successful move of a [`Monster`](crate::Monster) is recorded as a
//! [`TransitionRecord`]. Records keep state names rather than handles so a
//! history can be serialized and inspected on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single successful transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the transition that fired
    pub transition: String,
    /// Name of the state being left
    pub from: String,
    /// Name of the state being entered
    pub to: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of transitions.
///
/// Appending is O(1) amortized. A history built with [`History::with_limit`]
/// keeps only the most recent records, dropping the oldest as new ones
/// arrive.
///
/// # Example
///
/// ```rust
/// use monster::{History, TransitionRecord};
/// use chrono::Utc;
///
/// let history = History::new().record(TransitionRecord {
///     transition: "open".to_string(),
///     from: "closed".to_string(),
///     to: "opened".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec!["closed", "opened"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    records: VecDeque<TransitionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty history that retains at most `limit` records.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: Some(limit),
        }
    }

    /// Append a record, returning the history for chaining.
    pub fn record(mut self, record: TransitionRecord) -> Self {
        self.push(record);
        self
    }

    /// Append a record in place, evicting the oldest one past the limit.
    pub fn push(&mut self, record: TransitionRecord) {
        if self.limit == Some(0) {
            return;
        }
        self.records.push_back(record);
        self.trim();
    }

    /// Change the retention limit, dropping the oldest records that no
    /// longer fit. `None` keeps everything.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        self.trim();
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Drop every record, keeping the limit.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            while self.records.len() > limit {
                self.records.pop_front();
            }
        }
    }

    /// Names of the states traversed: the first source, then every target.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Time between the first and last retained transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn records(
        &self,
    ) -> impl DoubleEndedIterator<Item = &TransitionRecord> + ExactSizeIterator {
        self.records.iter()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
