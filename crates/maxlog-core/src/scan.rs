//! Single-pass scan orchestration: discover → parse → normalize → track.
//!
//! One call, one pass. Exports are read whole before processing; the
//! tracker owns the maxima map for the duration of the scan and hands it
//! off in the returned [`ScanOutcome`] once every entry has been seen.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{MainLiftCountError, ReportConfig};
use crate::error::ErrorCode;
use crate::export::{self, ExportError};
use crate::model::Exercise;
use crate::normalize::{self, InvalidRepCount};
use crate::tracker::{PrEvent, PrKey, PrTracker};

/// Errors that can end a scan. All are fatal; a scan never emits partial
/// results.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] MainLiftCountError),

    #[error(transparent)]
    Export(#[from] ExportError),

    /// A record with a rep count below 1, with the file it came from.
    #[error("{path}: {source}")]
    InvalidRepCount {
        path: PathBuf,
        source: InvalidRepCount,
    },
}

impl ScanError {
    /// The stable error code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Config(_) => ErrorCode::MainLiftCountInvalid,
            Self::Export(err) => err.code(),
            Self::InvalidRepCount { .. } => ErrorCode::InvalidRepCount,
        }
    }
}

/// Everything one scan produces.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Every discovered user, in first-seen (sorted-discovery) order,
    /// including users whose export holds no tracked lifts.
    pub users: Vec<String>,
    /// PR events in processing order.
    pub events: Vec<PrEvent>,
    /// Final maxima per (user, exercise, bracket).
    pub maxima: HashMap<PrKey, u32>,
    /// The resolved main lifts, in summary column order.
    pub main_lifts: [Exercise; 3],
    /// Total entries scanned, tracked or not.
    pub entries_scanned: usize,
}

/// Run the full scan over the export tree under `root`.
///
/// # Errors
///
/// Fails on config, discovery, read, parse, or rep-count errors; see
/// [`ScanError`].
pub fn run_scan(root: &Path, config: &ReportConfig) -> Result<ScanOutcome, ScanError> {
    let main_lifts = config.main_lifts()?;
    let exports = export::discover(root, &config.export_file)?;

    let mut tracker = PrTracker::new(&main_lifts);
    let mut users = Vec::with_capacity(exports.len());
    let mut entries_scanned = 0;

    for user_export in &exports {
        let raw_entries = user_export.read_entries()?;
        entries_scanned += raw_entries.len();

        let before = tracker.event_count();
        for raw in &raw_entries {
            let entry = normalize::normalize(raw).map_err(|source| ScanError::InvalidRepCount {
                path: user_export.path.clone(),
                source,
            })?;

            if let Some(event) = tracker.observe(&entry) {
                debug!(
                    user = %event.user,
                    exercise = %event.exercise,
                    reps = %event.bracket,
                    weight = event.weight,
                    "new PR"
                );
            }
        }

        info!(
            user = %user_export.user,
            entries = raw_entries.len(),
            prs = tracker.event_count() - before,
            "export scanned"
        );
        users.push(user_export.user.clone());
    }

    let (events, maxima) = tracker.finish();
    info!(
        users = users.len(),
        entries = entries_scanned,
        events = events.len(),
        "scan complete"
    );

    Ok(ScanOutcome {
        users,
        events,
        maxima,
        main_lifts,
        entries_scanned,
    })
}
