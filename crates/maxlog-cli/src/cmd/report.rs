//! `mx report` — run the full pipeline and write the report artifacts.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use maxlog_core::error::ErrorCode;
use maxlog_core::summary;

use crate::output::{CliError, OutputMode, render, render_error};
use crate::report::{chart, html};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Export root containing per-user folders.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Output path for the HTML report.
    #[arg(long, value_name = "PATH", default_value = "prs.html")]
    pub out: PathBuf,

    /// Also write the standalone SVG chart here.
    #[arg(long, value_name = "PATH")]
    pub chart: Option<PathBuf>,
}

/// Run report for `mx report`.
#[derive(Debug, Serialize)]
struct RunReport {
    users: usize,
    entries_scanned: usize,
    pr_events: usize,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<String>,
}

fn write_artifact(path: &Path, content: &str, output: OutputMode) -> Result<()> {
    if let Err(err) = fs::write(path, content) {
        render_error(
            output,
            &CliError::from_code(
                ErrorCode::ReportWriteFailed,
                format!("failed to write {}: {err}", path.display()),
            ),
        )?;
        return Err(err.into());
    }
    info!(path = %path.display(), bytes = content.len(), "wrote artifact");
    Ok(())
}

/// Execute `mx report`.
pub fn run_report(args: &ReportArgs, output: OutputMode, quiet: bool) -> Result<()> {
    let (config, outcome) = super::load_and_scan(&args.root, output)?;
    let rows = summary::summarize(&outcome.maxima, &outcome.users, &outcome.main_lifts);

    let page = html::render_page(
        &outcome.events,
        &rows,
        &outcome.users,
        &outcome.main_lifts,
        &config.weight_unit,
    )?;
    write_artifact(&args.out, &page, output)?;

    let mut chart_path = None;
    if let Some(path) = &args.chart {
        let svg = chart::render_chart(
            &outcome.events,
            &outcome.users,
            &outcome.main_lifts,
            &config.weight_unit,
        )?;
        write_artifact(path, &svg, output)?;
        chart_path = Some(path.display().to_string());
    }

    if quiet {
        return Ok(());
    }

    let payload = RunReport {
        users: outcome.users.len(),
        entries_scanned: outcome.entries_scanned,
        pr_events: outcome.events.len(),
        html: args.out.display().to_string(),
        chart: chart_path,
    };

    render(
        output,
        &payload,
        |payload, w| {
            writeln!(
                w,
                "{}\t{}\t{}\t{}",
                payload.users, payload.entries_scanned, payload.pr_events, payload.html
            )
        },
        |payload, w| {
            writeln!(
                w,
                "✓ wrote {} ({} users, {} entries, {} PRs)",
                payload.html, payload.users, payload.entries_scanned, payload.pr_events
            )?;
            if let Some(ref chart) = payload.chart {
                writeln!(w, "✓ wrote {chart}")?;
            }
            Ok(())
        },
    )
}
