use super::Context;
use clap::{Args, ValueEnum};
use classjournal_core::{
    export_rows, record_rows, todo_rows, ExportOutcome, ExportRequest, JournalStore,
};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportKind {
    /// One row per attendance record
    Records,
    /// One row per todo item
    Todos,
}

#[derive(Args, Debug)]
pub struct Command {
    #[arg(value_enum)]
    kind: ExportKind,

    /// File stem; `.xlsx` is appended
    #[clap(long)]
    filename: Option<String>,

    /// Output directory; defaults to the current directory
    #[clap(long)]
    out_dir: Option<PathBuf>,
}

pub fn handle(command: Command, context: &Context) -> anyhow::Result<()> {
    let store = context.open_store()?;
    let request = match command.kind {
        ExportKind::Records => ExportRequest::from_serializable(
            &record_rows(store.records(), store.students()),
            command.filename.unwrap_or_else(|| "출결_기록".to_string()),
        )?
        .with_sheet_name("출결"),
        ExportKind::Todos => ExportRequest::from_serializable(
            &todo_rows(store.todos()),
            command.filename.unwrap_or_else(|| "할일_목록".to_string()),
        )?
        .with_sheet_name("할 일"),
    };

    let out_dir = command.out_dir.unwrap_or_else(|| PathBuf::from("."));
    match export_rows(&request, &out_dir) {
        ExportOutcome::Written(path) => println!("wrote {}", path.display()),
        ExportOutcome::SkippedEmpty => println!("nothing to export"),
        ExportOutcome::Failed(message) => anyhow::bail!("export failed: {message}"),
    }
    Ok(())
}
