use anyhow::Context as _;
use chrono::NaiveDate;
use clap::Subcommand;
use classjournal_core::{local_today, parse_journal_date, JournalStore, SnapshotFileStore};
use std::path::PathBuf;

pub mod dashboard;
pub mod export;
pub mod select;
pub mod todo;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show attendance, trend, atmosphere, and summary for the selected date
    Dashboard(dashboard::Command),
    /// Show the 30-day atmosphere histogram and calendar strip
    Atmosphere(dashboard::AtmosphereCommand),
    /// Manage the todo list of the selected date
    Todo(todo::Command),
    /// Write records or todos to an .xlsx spreadsheet
    Export(export::Command),
    /// Change the snapshot's current date
    Select(select::Command),
}

/// Options shared by every command.
pub struct Context {
    pub snapshot: PathBuf,
    pub date: Option<String>,
}

impl Context {
    pub fn open_store(&self) -> anyhow::Result<SnapshotFileStore> {
        SnapshotFileStore::open_or_create(&self.snapshot, local_today())
            .with_context(|| format!("failed to open snapshot `{}`", self.snapshot.display()))
    }

    /// `--date` when given, otherwise the store's current date.
    pub fn selected_date(&self, store: &SnapshotFileStore) -> anyhow::Result<NaiveDate> {
        match self.date.as_deref() {
            Some(value) => Ok(parse_journal_date(value)?),
            None => Ok(store.current_date()),
        }
    }
}

impl Command {
    pub fn execute(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Dashboard(o) => dashboard::handle(o, context),
            Self::Atmosphere(o) => dashboard::handle_atmosphere(o, context),
            Self::Todo(o) => todo::handle(o, context),
            Self::Export(o) => export::handle(o, context),
            Self::Select(o) => select::handle(o, context),
        }
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
