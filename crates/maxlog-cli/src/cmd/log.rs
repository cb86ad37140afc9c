//! `mx log` — print the PR event stream.

use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use maxlog_core::tracker::PrEvent;

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Export root containing per-user folders.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Filter to one user.
    #[arg(long)]
    pub user: Option<String>,

    /// Filter to one exercise (canonical name, qualifier-free).
    #[arg(long, value_name = "NAME")]
    pub exercise: Option<String>,
}

fn keep(event: &PrEvent, args: &LogArgs) -> bool {
    if args.user.as_deref().is_some_and(|u| u != event.user) {
        return false;
    }
    if args
        .exercise
        .as_deref()
        .is_some_and(|e| e != event.exercise.as_str())
    {
        return false;
    }
    true
}

/// Execute `mx log`.
pub fn run_log(args: &LogArgs, output: OutputMode) -> Result<()> {
    let (config, outcome) = super::load_and_scan(&args.root, output)?;

    let events: Vec<PrEvent> = outcome
        .events
        .into_iter()
        .filter(|event| keep(event, args))
        .collect();

    let unit = config.weight_unit;
    render(
        output,
        &events,
        |events, w| {
            for event in events {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}",
                    event.date.format("%Y-%m-%d"),
                    event.user,
                    event.exercise,
                    event.bracket,
                    event.weight
                )?;
            }
            Ok(())
        },
        |events, w| {
            if events.is_empty() {
                return writeln!(w, "No PR events.");
            }
            for event in events {
                writeln!(
                    w,
                    "{}  {:<12} {:<16} ×{}  {:>4} {unit}",
                    event.date.format("%Y-%m-%d"),
                    event.user,
                    event.exercise.to_string(),
                    event.bracket,
                    event.weight
                )?;
            }
            Ok(())
        },
    )
}
