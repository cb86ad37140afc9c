#![forbid(unsafe_code)]

mod cmd;
mod output;
mod report;

use clap::{CommandFactory, Parser, Subcommand};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use output::resolve_output_mode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "maxlog: PR extraction and reporting for workout logs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Reports",
        about = "Render the HTML PR report",
        long_about = "Scan the export tree and write the HTML report (chart + latest-PRs table).",
        after_help = "EXAMPLES:\n    # Write prs.html from the current directory\n    mx report\n\n    # Scan a different export tree and keep the standalone chart\n    mx report --root ~/exports --chart prs.svg\n\n    # Emit machine-readable output\n    mx report --json"
    )]
    Report(cmd::report::ReportArgs),

    #[command(
        next_help_heading = "Read",
        about = "Print the PR event stream",
        long_about = "Print every PR event in processing order, optionally filtered.",
        after_help = "EXAMPLES:\n    # All PR events\n    mx log\n\n    # One user's squat PRs\n    mx log --user alice --exercise Squat\n\n    # Emit machine-readable output\n    mx log --json"
    )]
    Log(cmd::log::LogArgs),

    #[command(
        next_help_heading = "Read",
        about = "Print the latest-PRs table",
        long_about = "Print one row per user with 5RM/1RM per main lift and the powerlift total.",
        after_help = "EXAMPLES:\n    # Summary table for the current directory\n    mx summary\n\n    # Emit machine-readable output\n    mx summary --json"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    mx completions bash\n\n    # Generate zsh completions\n    mx completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MAXLOG_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "maxlog_core=debug,maxlog_cli=debug,info"
        } else {
            "maxlog_core=info,maxlog_cli=info,warn"
        })
    });

    let format = env::var("MAXLOG_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let user_config = maxlog_core::config::load_user_config()?;
    let output = resolve_output_mode(cli.json, user_config.output.as_deref());

    match cli.command {
        Commands::Report(ref args) => cmd::report::run_report(args, output, cli.quiet),
        Commands::Log(ref args) => cmd::log::run_log(args, output),
        Commands::Summary(ref args) => cmd::summary::run_summary(args, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
