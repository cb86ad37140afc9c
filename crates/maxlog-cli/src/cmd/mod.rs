//! Command handlers, one module per subcommand.

pub mod completions;
pub mod log;
pub mod report;
pub mod summary;

use std::path::Path;

use maxlog_core::config::{self, ReportConfig};
use maxlog_core::error::ErrorCode;
use maxlog_core::scan::{self, ScanOutcome};

use crate::output::{CliError, OutputMode, render_error};

/// Load the project config and run the scan, rendering any failure to
/// stderr in the requested mode before propagating it.
pub fn load_and_scan(
    root: &Path,
    output: OutputMode,
) -> anyhow::Result<(ReportConfig, ScanOutcome)> {
    let report_config = match config::load_project_config(root) {
        Ok(cfg) => cfg,
        Err(err) => {
            render_error(
                output,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            return Err(err);
        }
    };

    match scan::run_scan(root, &report_config) {
        Ok(outcome) => Ok((report_config, outcome)),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err.into())
        }
    }
}
