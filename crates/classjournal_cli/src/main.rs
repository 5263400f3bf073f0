//! `classjournal` command-line front end.
//!
//! # Responsibility
//! - Drive dashboard, todo, and export use-cases against a snapshot file.
//! - Keep output deterministic; `--json` prints machine-readable views.

use anyhow::Context as _;
use clap::Parser;
use classjournal_core::{default_log_level, init_logging};
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "classjournal",
    version,
    about = "Class journal dashboard, per-day todos, and spreadsheet export."
)]
struct Args {
    /// Journal snapshot JSON file; created empty when missing.
    #[arg(
        long,
        env = "CLASSJOURNAL_SNAPSHOT",
        global = true,
        default_value = "classjournal.json"
    )]
    snapshot: PathBuf,

    /// Selected date (YYYY-MM-DD). Defaults to the snapshot's current date.
    #[arg(long, global = true)]
    date: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or_else(|| default_log_level());
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let context = commands::Context {
        snapshot: args.snapshot,
        date: args.date,
    };
    args.command.execute(&context)
}
