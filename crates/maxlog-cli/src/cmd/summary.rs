//! `mx summary` — print the latest-PRs table.

use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use maxlog_core::summary;

use crate::output::{OutputMode, column_widths, render, write_row};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Export root containing per-user folders.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

/// Execute `mx summary`.
pub fn run_summary(args: &SummaryArgs, output: OutputMode) -> Result<()> {
    let (_, outcome) = super::load_and_scan(&args.root, output)?;
    let rows = summary::summarize(&outcome.maxima, &outcome.users, &outcome.main_lifts);
    let headers = summary::table_headers(&outcome.main_lifts);

    render(
        output,
        &rows,
        |rows, w| {
            writeln!(w, "{}", headers.join("\t"))?;
            for row in rows {
                writeln!(w, "{}", row.cells().join("\t"))?;
            }
            Ok(())
        },
        |rows, w| {
            let cells: Vec<Vec<String>> = rows.iter().map(summary::SummaryRow::cells).collect();
            let widths = column_widths(&headers, &cells);
            let rule_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);

            write_row(w, &headers, &widths)?;
            writeln!(w, "{:-<rule_width$}", "")?;
            for row in &cells {
                write_row(w, row, &widths)?;
            }
            Ok(())
        },
    )
}
