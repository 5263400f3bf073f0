use super::Context;
use clap::Args;
use classjournal_core::{parse_journal_date, JournalStore};

#[derive(Args, Debug)]
pub struct Command {
    /// New current date (YYYY-MM-DD)
    date: String,
}

pub fn handle(command: Command, context: &Context) -> anyhow::Result<()> {
    let date = parse_journal_date(&command.date)?;
    let mut store = context.open_store()?;
    store.set_current_date(date)?;
    println!("current date set to {date}");
    Ok(())
}
