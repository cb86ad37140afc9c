//! Per-user workout export discovery and reading.
//!
//! Exports live one level below a root directory, one folder per user:
//!
//! ```text
//! <root>/
//!   alice/strong.csv
//!   bob/strong.csv
//!   maxlog.toml        # optional project config
//! ```
//!
//! The user id is the directory name. Discovery sorts by user name so scans
//! are deterministic across filesystems and re-runs; that order is also the
//! order users appear in the summary.
//!
//! # Invariants
//!
//! - Exports are read once, whole, before any processing.
//! - Row order inside a file is preserved (chronological-order precondition
//!   for the tracker).
//! - Nothing here mutates the export tree.

pub mod csv;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ErrorCode;
use crate::model::RawEntry;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while locating or reading exports.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The export root does not exist or is not a directory.
    #[error("export root '{0}' does not exist or is not a directory")]
    RootMissing(PathBuf),

    /// The root exists but holds no `<user>/<export file>` entries.
    #[error("no <user>/{file} exports found under '{root}'")]
    NoExports { root: PathBuf, file: String },

    /// I/O error while scanning the root.
    #[error("failed to scan export root: {0}")]
    Scan(#[from] io::Error),

    /// I/O error while reading one export file.
    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    /// A row in one export file failed to parse.
    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        source: csv::ParseError,
    },
}

impl ExportError {
    /// The stable error code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RootMissing(_) => ErrorCode::ExportRootMissing,
            Self::NoExports { .. } => ErrorCode::NoExportsFound,
            Self::Scan(_) | Self::Read { .. } => ErrorCode::ExportReadFailed,
            Self::Parse { .. } => ErrorCode::ExportParseError,
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// One user's export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserExport {
    /// User id (the export directory name).
    pub user: String,
    /// Path to the export file.
    pub path: PathBuf,
}

impl UserExport {
    /// Read and parse this export into raw entries, preserving file order.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or any row is malformed.
    pub fn read_entries(&self) -> Result<Vec<RawEntry>, ExportError> {
        let content = fs::read_to_string(&self.path).map_err(|source| ExportError::Read {
            path: self.path.clone(),
            source,
        })?;

        csv::parse_export(&self.user, &content).map_err(|source| ExportError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Find `<user>/<export_file>` one level below `root`, sorted by user name.
///
/// Directories without the export file are ignored (they may hold other
/// data); non-UTF-8 directory names are skipped.
///
/// # Errors
///
/// Fails when the root is missing, unreadable, or contains no exports.
pub fn discover(root: &Path, export_file: &str) -> Result<Vec<UserExport>, ExportError> {
    if !root.is_dir() {
        return Err(ExportError::RootMissing(root.to_path_buf()));
    }

    let mut exports = Vec::new();
    for dir_entry in fs::read_dir(root)? {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type()?.is_dir() {
            continue;
        }

        let path = dir_entry.path().join(export_file);
        if !path.is_file() {
            continue;
        }

        let Some(user) = dir_entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };

        debug!(user = %user, path = %path.display(), "found export");
        exports.push(UserExport { user, path });
    }

    if exports.is_empty() {
        return Err(ExportError::NoExports {
            root: root.to_path_buf(),
            file: export_file.to_owned(),
        });
    }

    exports.sort_by(|a, b| a.user.cmp(&b.user));
    Ok(exports)
}
