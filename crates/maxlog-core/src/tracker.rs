//! Running-maximum PR tracking over an ordered entry stream.
//!
//! The tracker owns the only mutable state in the pipeline: a map from
//! (user, exercise, bracket) to the maximum weight seen so far. Values only
//! ever increase. An entry strictly above the current maximum emits a
//! [`PrEvent`]; an equal weight does not, which makes replaying an
//! identical stream (or exact duplicate rows from a re-generated export) a
//! no-op.
//!
//! # Invariants
//!
//! - Chronological order within each user's stream is a precondition
//!   supplied by export file order; the tracker never sorts.
//! - Per key, emitted event weights are strictly increasing.
//! - The final map value for a key equals the maximum weight among tracked
//!   entries with that key.
//! - Events are immutable once emitted and appear in processing order.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{CanonicalEntry, Exercise, RepBracket};

/// Key for one tracked maximum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrKey {
    pub user: String,
    pub exercise: Exercise,
    pub bracket: RepBracket,
}

/// A new personal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrEvent {
    pub user: String,
    pub date: NaiveDateTime,
    pub exercise: Exercise,
    /// The new maximum, rounded.
    pub weight: u32,
    /// Serialized as the bucket floor integer under the `reps` key.
    #[serde(rename = "reps")]
    pub bracket: RepBracket,
}

impl PrEvent {
    /// The key this event advanced.
    #[must_use]
    pub fn key(&self) -> PrKey {
        PrKey {
            user: self.user.clone(),
            exercise: self.exercise.clone(),
            bracket: self.bracket,
        }
    }
}

/// Stateful PR scan over canonical entries.
#[derive(Debug)]
pub struct PrTracker {
    tracked: Vec<Exercise>,
    maxima: HashMap<PrKey, u32>,
    events: Vec<PrEvent>,
}

impl PrTracker {
    /// Create a tracker restricted to the given exercises.
    #[must_use]
    pub fn new(tracked: &[Exercise]) -> Self {
        Self {
            tracked: tracked.to_vec(),
            maxima: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Feed one entry, in stream order.
    ///
    /// Returns the PR event emitted for this entry, if any. Untracked
    /// exercises and non-record weights change nothing.
    pub fn observe(&mut self, entry: &CanonicalEntry) -> Option<PrEvent> {
        if !self.tracked.contains(&entry.exercise) {
            return None;
        }

        let key = PrKey {
            user: entry.user.clone(),
            exercise: entry.exercise.clone(),
            bracket: entry.bracket,
        };

        let current = self.maxima.get(&key).copied().unwrap_or(0);
        if entry.weight <= current {
            return None;
        }

        let event = PrEvent {
            user: entry.user.clone(),
            date: entry.date,
            exercise: entry.exercise.clone(),
            weight: entry.weight,
            bracket: entry.bracket,
        };
        self.maxima.insert(key, entry.weight);
        self.events.push(event.clone());
        Some(event)
    }

    /// Number of PR events emitted so far.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Consume the tracker, yielding the event stream and the final maxima.
    #[must_use]
    pub fn finish(self) -> (Vec<PrEvent>, HashMap<PrKey, u32>) {
        (self.events, self.maxima)
    }
}

/// One-shot scan over an already-normalized entry sequence.
#[must_use]
pub fn track<'a, I>(entries: I, tracked: &[Exercise]) -> (Vec<PrEvent>, HashMap<PrKey, u32>)
where
    I: IntoIterator<Item = &'a CanonicalEntry>,
{
    let mut tracker = PrTracker::new(tracked);
    for entry in entries {
        tracker.observe(entry);
    }
    tracker.finish()
}
