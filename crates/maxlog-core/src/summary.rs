//! Latest-PR summary projection.
//!
//! Runs once, after the tracker has seen every entry: the final maxima map
//! is projected into one row per user with the best five-rep and one-rep
//! weights for each main lift, plus the powerlift total (sum of the three
//! one-rep maxima). Missing maxima read as 0, so a user with no tracked
//! lifts still gets a (all-zero) row.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Exercise, RepBracket};
use crate::tracker::PrKey;

/// Best weights for one exercise within a [`SummaryRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiftMaxes {
    pub exercise: Exercise,
    pub five_rep_max: u32,
    pub one_rep_max: u32,
}

/// One user's summary: best lifts per main lift plus the powerlift total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub user: String,
    /// In main-lift column order.
    pub lifts: [LiftMaxes; 3],
    /// Sum of the three one-rep maxima.
    pub total: u32,
}

fn max_for(maxima: &HashMap<PrKey, u32>, user: &str, exercise: &Exercise, bracket: RepBracket) -> u32 {
    let key = PrKey {
        user: user.to_owned(),
        exercise: exercise.clone(),
        bracket,
    };
    maxima.get(&key).copied().unwrap_or(0)
}

/// Build one row per user, in the given user order.
///
/// The user order is the first-seen order from the scan; keeping it here
/// makes summaries stable across runs without re-sorting.
#[must_use]
pub fn summarize(
    maxima: &HashMap<PrKey, u32>,
    users: &[String],
    main_lifts: &[Exercise; 3],
) -> Vec<SummaryRow> {
    users
        .iter()
        .map(|user| {
            let lifts = main_lifts.clone().map(|exercise| LiftMaxes {
                five_rep_max: max_for(maxima, user, &exercise, RepBracket::Five),
                one_rep_max: max_for(maxima, user, &exercise, RepBracket::One),
                exercise,
            });
            let total = lifts.iter().map(|l| l.one_rep_max).sum();

            SummaryRow {
                user: user.clone(),
                lifts,
                total,
            }
        })
        .collect()
}

/// Column headers for tabular rendering, in row order.
///
/// `["user", "Bench 5RM", "Bench 1RM", ..., "Powerlift Total"]`.
#[must_use]
pub fn table_headers(main_lifts: &[Exercise; 3]) -> Vec<String> {
    let mut headers = vec!["user".to_owned()];
    for lift in main_lifts {
        headers.push(format!("{} 5RM", lift.short_label()));
        headers.push(format!("{} 1RM", lift.short_label()));
    }
    headers.push("Powerlift Total".to_owned());
    headers
}

impl SummaryRow {
    /// Flatten into cell values matching [`table_headers`] order.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![self.user.clone()];
        for lift in &self.lifts {
            cells.push(lift.five_rep_max.to_string());
            cells.push(lift.one_rep_max.to_string());
        }
        cells.push(self.total.to_string());
        cells
    }
}
