//! Core data model: exercises, rep brackets, and workout entries.

pub mod bracket;
pub mod entry;
pub mod exercise;

pub use bracket::RepBracket;
pub use entry::{CanonicalEntry, RawEntry};
pub use exercise::Exercise;
