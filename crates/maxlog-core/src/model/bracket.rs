//! Rep-count bracketing.
//!
//! Raw rep counts are coarsened into two buckets so each (user, exercise)
//! pair tracks two independent maxima: near-maximal singles and higher-rep
//! volume sets. The wire form is the bucket floor as an integer (1 or 5),
//! matching the `reps` column of the source exports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarsened repetition count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RepBracket {
    /// 1–4 reps: strength-max territory.
    One,
    /// 5 or more reps: volume sets.
    Five,
}

impl RepBracket {
    /// Both brackets, lowest first.
    pub const ALL: [Self; 2] = [Self::One, Self::Five];

    /// Bucket a raw rep count.
    ///
    /// Returns `None` for counts below 1; the normalizer turns that into a
    /// fatal error carrying the offending record.
    #[must_use]
    pub const fn from_reps(reps: i64) -> Option<Self> {
        if reps >= 5 {
            Some(Self::Five)
        } else if reps >= 1 {
            Some(Self::One)
        } else {
            None
        }
    }

    /// The bucket floor as a rep count.
    #[must_use]
    pub const fn reps(self) -> i64 {
        match self {
            Self::One => 1,
            Self::Five => 5,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Five => "5",
        }
    }
}

impl fmt::Display for RepBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Custom serde: the wire form is the bucket floor integer, not a variant name.
impl Serialize for RepBracket {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.reps())
    }
}

impl<'de> Deserialize<'de> for RepBracket {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let reps = i64::deserialize(deserializer)?;
        Self::from_reps(reps)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid rep count: {reps}")))
    }
}
