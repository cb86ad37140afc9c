//! Raw-entry normalization: qualifier stripping, weight rounding, and rep
//! bracketing.
//!
//! `normalize` is pure; it is the only place validation beyond field syntax
//! happens, so the tracker downstream is total over its input.

use chrono::NaiveDateTime;

use crate::model::{CanonicalEntry, Exercise, RawEntry, RepBracket};

/// A rep count below 1, identifying the offending record.
///
/// Fatal for the whole run: a rep count below 1 is a data-entry error
/// upstream that must be fixed, not skipped or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid rep count {reps} for user '{user}', {exercise} on {date}")]
pub struct InvalidRepCount {
    pub user: String,
    /// Exercise name after qualifier stripping.
    pub exercise: String,
    pub date: NaiveDateTime,
    /// The raw rep value as recorded.
    pub reps: i64,
}

/// Strip one trailing parenthetical equipment qualifier.
///
/// "Squat (Barbell)" and "Squat" share a canonical identity. Only a
/// trailing qualifier counts; parentheses elsewhere in the name are kept.
#[must_use]
pub fn strip_equipment(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.rfind(" (") {
            return trimmed[..open].trim_end();
        }
    }
    trimmed
}

/// Round a raw weight to the nearest integer, half away from zero.
///
/// The tie policy matters only for weights landing exactly on `.5`, but it
/// must be deterministic: ties round to the heavier side, so `100.5`
/// becomes `101`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // weight is validated finite and non-negative at parse time
pub fn round_weight(weight: f64) -> u32 {
    weight.round() as u32
}

/// Normalize one raw entry into its canonical form.
///
/// # Errors
///
/// Fails when the rep count is below 1; see [`InvalidRepCount`].
pub fn normalize(raw: &RawEntry) -> Result<CanonicalEntry, InvalidRepCount> {
    let name = strip_equipment(&raw.exercise_name);

    let bracket = RepBracket::from_reps(raw.reps).ok_or_else(|| InvalidRepCount {
        user: raw.user.clone(),
        exercise: name.to_owned(),
        date: raw.date,
        reps: raw.reps,
    })?;

    Ok(CanonicalEntry {
        user: raw.user.clone(),
        exercise: Exercise::from(name),
        date: raw.date,
        weight: round_weight(raw.weight),
        bracket,
    })
}
