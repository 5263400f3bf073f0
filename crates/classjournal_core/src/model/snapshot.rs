//! Whole-journal snapshot shape.
//!
//! # Responsibility
//! - Define the serialized form of a journal store.
//! - Validate cross-item invariants that single items cannot check.

use crate::model::record::{AttendanceRecord, Student};
use crate::model::todo::TodoItem;
use crate::model::ModelValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Serialized journal state: records, students, todos, and the selected day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub todos: Vec<TodoItem>,
    pub current_date: NaiveDate,
}

impl JournalSnapshot {
    /// Creates a snapshot with no data, selecting `current_date`.
    pub fn empty(current_date: NaiveDate) -> Self {
        Self {
            records: Vec::new(),
            students: Vec::new(),
            todos: Vec::new(),
            current_date,
        }
    }

    /// Checks record-date and todo-id uniqueness.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        let mut dates = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !dates.insert(record.date) {
                return Err(ModelValidationError::DuplicateRecordDate(record.date));
            }
        }

        let mut ids = HashSet::with_capacity(self.todos.len());
        for todo in &self.todos {
            if !ids.insert(&todo.id) {
                return Err(ModelValidationError::DuplicateTodoId(todo.id.to_string()));
            }
        }

        Ok(())
    }
}
