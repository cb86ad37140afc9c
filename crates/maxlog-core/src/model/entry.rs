//! Raw and canonical workout entries.
//!
//! Both record shapes are transient: a raw entry exists between export
//! parsing and normalization, a canonical entry between normalization and
//! the tracker. Neither is persisted.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Exercise, RepBracket};

/// One set from a workout export, as parsed and before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    /// User the export belongs to (the export directory name).
    pub user: String,
    /// Exercise display name, possibly with an equipment qualifier.
    pub exercise_name: String,
    pub date: NaiveDateTime,
    /// Weight as recorded, in the export's (consistent) unit.
    pub weight: f64,
    pub reps: i64,
}

/// A normalized entry ready for PR tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEntry {
    pub user: String,
    pub exercise: Exercise,
    pub date: NaiveDateTime,
    /// Weight rounded half away from zero.
    pub weight: u32,
    pub bracket: RepBracket,
}
