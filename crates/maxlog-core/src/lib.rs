//! maxlog-core: personal-record extraction over workout-log exports.
//!
//! The pipeline is a single synchronous pass: [`export`] discovers and
//! parses per-user CSV exports, [`normalize`] canonicalizes raw rows,
//! [`tracker`] folds canonical entries into PR events and running maxima,
//! and [`summary`] projects the final maxima into one row per user.
//! [`scan`] wires the whole pass together for callers.
//!
//! # Conventions
//!
//! - **Errors**: module-local `thiserror` enums in this crate; `anyhow` with
//!   context at binary boundaries. Every fatal error maps to a stable
//!   [`error::ErrorCode`].
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod normalize;
pub mod scan;
pub mod summary;
pub mod tracker;
