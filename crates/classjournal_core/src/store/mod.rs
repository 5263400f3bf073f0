//! Journal store contract and implementations.
//!
//! # Responsibility
//! - Define the read/replace contract services use to reach journal data.
//! - Provide in-memory and JSON snapshot backed stores.
//!
//! # Invariants
//! - Todo writes are full-list replacements; there is no partial update API.
//! - Readers always observe the latest replaced list.
//!
//! # See also
//! - `crate::service::todo_service` for the only todo writer.

mod memory;
mod snapshot_file;

pub use memory::MemoryJournalStore;
pub use snapshot_file::SnapshotFileStore;

use crate::model::record::{AttendanceRecord, Student};
use crate::model::todo::TodoItem;
use crate::model::ModelValidationError;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    Validation(ModelValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "journal snapshot I/O failed at `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid journal snapshot JSON: {err}"),
            Self::Validation(err) => write!(f, "invalid journal data: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ModelValidationError> for StoreError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Read access plus the single todo mutator consumed by services.
pub trait JournalStore {
    fn records(&self) -> &[AttendanceRecord];
    fn students(&self) -> &[Student];
    fn todos(&self) -> &[TodoItem];
    fn current_date(&self) -> NaiveDate;

    /// Replaces the whole global todo list in one step.
    fn update_todos(&mut self, todos: Vec<TodoItem>) -> StoreResult<()>;

    /// Changes the selected day.
    fn set_current_date(&mut self, date: NaiveDate) -> StoreResult<()>;
}

impl<S: JournalStore + ?Sized> JournalStore for &mut S {
    fn records(&self) -> &[AttendanceRecord] {
        (**self).records()
    }

    fn students(&self) -> &[Student] {
        (**self).students()
    }

    fn todos(&self) -> &[TodoItem] {
        (**self).todos()
    }

    fn current_date(&self) -> NaiveDate {
        (**self).current_date()
    }

    fn update_todos(&mut self, todos: Vec<TodoItem>) -> StoreResult<()> {
        (**self).update_todos(todos)
    }

    fn set_current_date(&mut self, date: NaiveDate) -> StoreResult<()> {
        (**self).set_current_date(date)
    }
}
