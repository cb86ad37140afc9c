//! Minimal CSV reader for Strong-style workout exports.
//!
//! Handles the subset of RFC 4180 the exports actually use: comma-separated
//! fields, optional double-quoting with `""` escapes, and a header row
//! naming the columns. Column order is not assumed; the header is mapped to
//! indices once and extra columns ("Workout Name", "Set Order", ...) are
//! ignored.
//!
//! Malformed rows are fatal. A workout export is small, hand-curated data;
//! a row that cannot be read signals an upstream data problem that must be
//! fixed, not skipped (a silently dropped set could hide a PR).

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::RawEntry;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_DATE: &str = "Date";
pub const COL_EXERCISE: &str = "Exercise Name";
pub const COL_WEIGHT: &str = "Weight";
pub const COL_REPS: &str = "Reps";

/// Timestamp format used by the exports (`2023-01-15 09:30:00`).
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Fallback for exports that carry bare dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while reading an export.
///
/// Line numbers are 1-based and refer to the physical line in the file,
/// header included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The file has no header row.
    #[error("export is empty (no header row)")]
    EmptyFile,

    /// The header row lacks a required column.
    #[error("header is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A data row has fewer fields than the header requires.
    #[error("line {line}: expected at least {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A required field is empty.
    #[error("line {line}: missing value for '{column}'")]
    MissingField { line: usize, column: &'static str },

    /// A field is present but does not parse.
    #[error("line {line}: invalid {column} '{raw}': {details}")]
    InvalidField {
        line: usize,
        column: &'static str,
        raw: String,
        details: String,
    },

    /// A quoted field is not closed before the end of the line.
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
}

// ---------------------------------------------------------------------------
// Field splitting
// ---------------------------------------------------------------------------

/// Split one CSV line into fields, honoring double quotes and `""` escapes.
fn split_fields(line: &str, line_no: usize) -> Result<Vec<String>, ParseError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedQuote { line: line_no });
    }

    fields.push(field);
    Ok(fields)
}

// ---------------------------------------------------------------------------
// Header mapping
// ---------------------------------------------------------------------------

/// Resolved column indices for the four fields the scan needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    date: usize,
    exercise: usize,
    weight: usize,
    reps: usize,
}

impl Header {
    fn parse(fields: &[String]) -> Result<Self, ParseError> {
        let find = |name: &'static str| {
            fields
                .iter()
                .position(|f| f.trim() == name)
                .ok_or(ParseError::MissingColumn(name))
        };

        Ok(Self {
            date: find(COL_DATE)?,
            exercise: find(COL_EXERCISE)?,
            weight: find(COL_WEIGHT)?,
            reps: find(COL_REPS)?,
        })
    }

    /// Minimum field count a data row must have to cover all mapped columns.
    const fn min_fields(self) -> usize {
        let mut max = self.date;
        if self.exercise > max {
            max = self.exercise;
        }
        if self.weight > max {
            max = self.weight;
        }
        if self.reps > max {
            max = self.reps;
        }
        max + 1
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn required<'a>(
    fields: &'a [String],
    index: usize,
    column: &'static str,
    line_no: usize,
) -> Result<&'a str, ParseError> {
    let raw = fields[index].trim();
    if raw.is_empty() {
        return Err(ParseError::MissingField {
            line: line_no,
            column,
        });
    }
    Ok(raw)
}

fn parse_date(raw: &str, line_no: usize) -> Result<NaiveDateTime, ParseError> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT) {
        return Ok(ts);
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .map_err(|err| ParseError::InvalidField {
            line: line_no,
            column: COL_DATE,
            raw: raw.to_owned(),
            details: err.to_string(),
        })
}

fn parse_weight(raw: &str, line_no: usize) -> Result<f64, ParseError> {
    let invalid = |details: &str| ParseError::InvalidField {
        line: line_no,
        column: COL_WEIGHT,
        raw: raw.to_owned(),
        details: details.to_owned(),
    };

    let weight: f64 = raw.parse().map_err(|_| invalid("not a number"))?;
    if !weight.is_finite() {
        return Err(invalid("not finite"));
    }
    if weight < 0.0 {
        return Err(invalid("negative"));
    }
    Ok(weight)
}

fn parse_reps(raw: &str, line_no: usize) -> Result<i64, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidField {
        line: line_no,
        column: COL_REPS,
        raw: raw.to_owned(),
        details: "not an integer".to_owned(),
    })
}

fn parse_row(
    user: &str,
    header: Header,
    fields: &[String],
    line_no: usize,
) -> Result<RawEntry, ParseError> {
    let expected = header.min_fields();
    if fields.len() < expected {
        return Err(ParseError::FieldCount {
            line: line_no,
            expected,
            found: fields.len(),
        });
    }

    let date = parse_date(required(fields, header.date, COL_DATE, line_no)?, line_no)?;
    let exercise_name = required(fields, header.exercise, COL_EXERCISE, line_no)?.to_owned();
    let weight = parse_weight(required(fields, header.weight, COL_WEIGHT, line_no)?, line_no)?;
    let reps = parse_reps(required(fields, header.reps, COL_REPS, line_no)?, line_no)?;

    Ok(RawEntry {
        user: user.to_owned(),
        exercise_name,
        date,
        weight,
        reps,
    })
}

// ---------------------------------------------------------------------------
// Export parsing
// ---------------------------------------------------------------------------

/// Parse one user's export into raw entries, preserving file order.
///
/// File order is the chronological-order precondition the tracker relies
/// on; this function never reorders rows.
///
/// # Errors
///
/// Fails on a missing header column, a short row, an empty required field,
/// or an unparseable date/weight/reps value. All are fatal; no row is ever
/// skipped.
pub fn parse_export(user: &str, content: &str) -> Result<Vec<RawEntry>, ParseError> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_idx, header_line) = lines.next().ok_or(ParseError::EmptyFile)?;
    let header = Header::parse(&split_fields(header_line, header_idx + 1)?)?;

    let mut entries = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let fields = split_fields(line, line_no)?;
        entries.push(parse_row(user, header, &fields, line_no)?);
    }

    Ok(entries)
}
