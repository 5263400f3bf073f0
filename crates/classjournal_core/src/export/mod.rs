//! Spreadsheet export of tabular journal data.
//!
//! # Responsibility
//! - Turn object-shaped rows into a single-sheet `.xlsx` file.
//! - Size every column to its longest header or cell text.
//!
//! # Invariants
//! - Empty input short-circuits without creating a file.
//! - `export_rows` never returns an error; failures are logged and reported
//!   as `ExportOutcome::Failed`.
//! - Header order is the first-seen order of keys across all rows.

mod rows;
mod xlsx;

pub use rows::{record_rows, todo_rows, RecordRow, TodoRow};

use log::{error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Sheet name used when a request does not name one.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
/// Extra characters added to each computed column width.
pub const COLUMN_WIDTH_PADDING: usize = 2;

static UNSAFE_FILENAME_CHARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[/\\:*?"<>|\x00-\x1F]"#).expect("valid filename sanitizer regex")
});

/// One object-shaped row.
pub type ExportRow = Map<String, Value>;

/// Export failure details.
#[derive(Debug)]
pub enum ExportError {
    /// Row at `index` did not serialize to a JSON object.
    RowNotObject { index: usize },
    /// Filename is empty after sanitizing.
    InvalidFilename(String),
    /// More columns than a worksheet can hold.
    TooManyColumns(usize),
    /// More rows than a worksheet can hold.
    TooManyRows(usize),
    Serialize(serde_json::Error),
    Xlsx(rust_xlsxwriter::XlsxError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowNotObject { index } => {
                write!(f, "export row {index} is not an object")
            }
            Self::InvalidFilename(value) => write!(f, "invalid export filename `{value}`"),
            Self::TooManyColumns(count) => write!(f, "too many export columns: {count}"),
            Self::TooManyRows(count) => write!(f, "too many export rows: {count}"),
            Self::Serialize(err) => write!(f, "failed to serialize export rows: {err}"),
            Self::Xlsx(err) => write!(f, "failed to write spreadsheet: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Xlsx(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(value)
    }
}

/// Result of a fire-and-forget export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File written at the contained path.
    Written(PathBuf),
    /// No rows; nothing written.
    SkippedEmpty,
    /// Export failed; the message was logged.
    Failed(String),
}

/// Rows plus target naming for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub rows: Vec<ExportRow>,
    /// File stem; `.xlsx` is appended.
    pub filename: String,
    pub sheet_name: Option<String>,
}

impl ExportRequest {
    pub fn new(rows: Vec<ExportRow>, filename: impl Into<String>) -> Self {
        Self {
            rows,
            filename: filename.into(),
            sheet_name: None,
        }
    }

    /// Builds a request from any rows that serialize to JSON objects.
    pub fn from_serializable<T: Serialize>(
        rows: &[T],
        filename: impl Into<String>,
    ) -> Result<Self, ExportError> {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(index, row)| match serde_json::to_value(row)? {
                Value::Object(map) => Ok(map),
                _ => Err(ExportError::RowNotObject { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rows, filename))
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    pub fn effective_sheet_name(&self) -> &str {
        self.sheet_name.as_deref().unwrap_or(DEFAULT_SHEET_NAME)
    }
}

/// Exports rows into `dir`, logging and swallowing any failure.
pub fn export_rows(request: &ExportRequest, dir: &Path) -> ExportOutcome {
    match try_export_rows(request, dir) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(
                "event=export module=export status=error rows={} error={}",
                request.rows.len(),
                err
            );
            ExportOutcome::Failed(err.to_string())
        }
    }
}

/// Exports rows into `dir`, returning failures to the caller.
pub fn try_export_rows(request: &ExportRequest, dir: &Path) -> Result<ExportOutcome, ExportError> {
    if request.rows.is_empty() {
        warn!("event=export module=export status=skip reason=empty_rows");
        return Ok(ExportOutcome::SkippedEmpty);
    }

    let started_at = Instant::now();
    let stem = sanitize_filename(&request.filename)?;
    let path = dir.join(format!("{stem}.xlsx"));
    let header = header_keys(&request.rows);
    let widths = column_widths(&header, &request.rows);

    xlsx::write_workbook(
        &path,
        request.effective_sheet_name(),
        &header,
        &widths,
        &request.rows,
    )?;

    info!(
        "event=export module=export status=ok rows={} columns={} duration_ms={}",
        request.rows.len(),
        header.len(),
        started_at.elapsed().as_millis()
    );
    Ok(ExportOutcome::Written(path))
}

/// Union of row keys in first-seen order.
pub fn header_keys(rows: &[ExportRow]) -> Vec<String> {
    let mut header: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !header.iter().any(|existing| existing == key) {
                header.push(key.clone());
            }
        }
    }
    header
}

/// Width per header column: longest of header and cell texts, plus padding.
pub fn column_widths(header: &[String], rows: &[ExportRow]) -> Vec<usize> {
    header
        .iter()
        .map(|key| {
            let longest_cell = rows
                .iter()
                .map(|row| row.get(key).map_or(0, |value| cell_text(value).chars().count()))
                .max()
                .unwrap_or(0);
            key.chars().count().max(longest_cell) + COLUMN_WIDTH_PADDING
        })
        .collect()
}

/// Display text of a cell. Null renders as blank.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn sanitize_filename(filename: &str) -> Result<String, ExportError> {
    let sanitized = UNSAFE_FILENAME_CHARS_RE.replace_all(filename.trim(), "_");
    let sanitized = sanitized.trim_matches('.').trim();
    if sanitized.is_empty() {
        return Err(ExportError::InvalidFilename(filename.to_string()));
    }
    Ok(sanitized.to_string())
}
