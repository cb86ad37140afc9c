//! Canonical exercise identity.
//!
//! Exercise names in workout exports carry equipment qualifiers
//! ("Squat (Barbell)"); the canonical identity is the bare display name.
//! The three main lifts get dedicated variants so the tracked set and the
//! summary column layout never depend on string comparisons; everything
//! else folds into [`Exercise::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A canonical exercise identity.
///
/// The string representation is the display name as it appears in exports
/// after qualifier stripping ("Bench Press", "Squat", "Deadlift", or the
/// raw name for anything else).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Exercise {
    /// Bench press.
    BenchPress,
    /// Back squat.
    Squat,
    /// Deadlift.
    Deadlift,
    /// Any exercise outside the main-lift set, kept by display name.
    Other(String),
}

impl Exercise {
    /// The three main lifts, in summary column order.
    pub const MAIN_LIFTS: [Self; 3] = [Self::BenchPress, Self::Squat, Self::Deadlift];

    /// Canonical display name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BenchPress => "Bench Press",
            Self::Squat => "Squat",
            Self::Deadlift => "Deadlift",
            Self::Other(name) => name,
        }
    }

    /// Short label for table column headers ("Bench 5RM").
    #[must_use]
    pub fn short_label(&self) -> &str {
        match self {
            Self::BenchPress => "Bench",
            Self::Squat => "Squat",
            Self::Deadlift => "Deadlift",
            Self::Other(name) => name,
        }
    }

    /// Returns `true` for the three main lifts.
    #[must_use]
    pub const fn is_main_lift(&self) -> bool {
        matches!(self, Self::BenchPress | Self::Squat | Self::Deadlift)
    }
}

impl From<&str> for Exercise {
    fn from(name: &str) -> Self {
        match name {
            "Bench Press" => Self::BenchPress,
            "Squat" => Self::Squat,
            "Deadlift" => Self::Deadlift,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for Exercise {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Bench Press" => Self::BenchPress,
            "Squat" => Self::Squat,
            "Deadlift" => Self::Deadlift,
            _ => Self::Other(name),
        }
    }
}

impl FromStr for Exercise {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Custom serde: the canonical display name is the wire form.
impl Serialize for Exercise {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Exercise {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name))
    }
}
