//! Project and user configuration.
//!
//! Project config lives at `<root>/maxlog.toml` next to the per-user export
//! folders; a missing file means defaults. User config
//! (`<config dir>/maxlog/config.toml`) only carries presentation
//! preferences.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::Exercise;

/// Number of main lifts the summary layout supports.
pub const MAIN_LIFT_COUNT: usize = 3;

/// Project-level report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Display names of the tracked lifts, in summary column order.
    #[serde(default = "default_main_lifts")]
    pub main_lifts: Vec<String>,
    /// Unit label for rendered weights; never used for conversion.
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
    /// Export file name expected inside each user folder.
    #[serde(default = "default_export_file")]
    pub export_file: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            main_lifts: default_main_lifts(),
            weight_unit: default_weight_unit(),
            export_file: default_export_file(),
        }
    }
}

/// The configured lift list does not have exactly [`MAIN_LIFT_COUNT`] names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected exactly {MAIN_LIFT_COUNT} main lifts, found {found}")]
pub struct MainLiftCountError {
    pub found: usize,
}

impl ReportConfig {
    /// Resolve the configured lift names into canonical exercises.
    ///
    /// # Errors
    ///
    /// Fails unless exactly [`MAIN_LIFT_COUNT`] lifts are configured; the
    /// summary column layout is fixed.
    pub fn main_lifts(&self) -> Result<[Exercise; MAIN_LIFT_COUNT], MainLiftCountError> {
        let lifts: Vec<Exercise> = self
            .main_lifts
            .iter()
            .map(|name| Exercise::from(name.as_str()))
            .collect();

        <[Exercise; MAIN_LIFT_COUNT]>::try_from(lifts)
            .map_err(|v| MainLiftCountError { found: v.len() })
    }
}

/// User-level configuration (presentation preferences only).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Default output mode: `"pretty"`, `"text"`, or `"json"`.
    #[serde(default)]
    pub output: Option<String>,
}

/// Load the project config from `<root>/maxlog.toml`, defaults if absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_project_config(root: &Path) -> Result<ReportConfig> {
    let path = root.join("maxlog.toml");
    if !path.exists() {
        return Ok(ReportConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ReportConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the user config from the platform config directory, defaults if
/// absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("maxlog/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn default_main_lifts() -> Vec<String> {
    Exercise::MAIN_LIFTS
        .iter()
        .map(|lift| lift.as_str().to_owned())
        .collect()
}

fn default_weight_unit() -> String {
    "kg".to_owned()
}

fn default_export_file() -> String {
    "strong.csv".to_owned()
}
