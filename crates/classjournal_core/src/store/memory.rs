use super::{JournalStore, StoreResult};
use crate::model::record::{AttendanceRecord, Student};
use crate::model::snapshot::JournalSnapshot;
use crate::model::todo::TodoItem;
use chrono::NaiveDate;

/// Journal store held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryJournalStore {
    snapshot: JournalSnapshot,
    todo_writes: usize,
}

impl MemoryJournalStore {
    /// Wraps a snapshot after validating its invariants.
    pub fn new(snapshot: JournalSnapshot) -> StoreResult<Self> {
        snapshot.validate()?;
        Ok(Self {
            snapshot,
            todo_writes: 0,
        })
    }

    pub fn empty(current_date: NaiveDate) -> Self {
        Self {
            snapshot: JournalSnapshot::empty(current_date),
            todo_writes: 0,
        }
    }

    pub fn snapshot(&self) -> &JournalSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> JournalSnapshot {
        self.snapshot
    }

    /// Number of `update_todos` calls applied so far.
    pub fn todo_writes(&self) -> usize {
        self.todo_writes
    }
}

impl JournalStore for MemoryJournalStore {
    fn records(&self) -> &[AttendanceRecord] {
        &self.snapshot.records
    }

    fn students(&self) -> &[Student] {
        &self.snapshot.students
    }

    fn todos(&self) -> &[TodoItem] {
        &self.snapshot.todos
    }

    fn current_date(&self) -> NaiveDate {
        self.snapshot.current_date
    }

    fn update_todos(&mut self, todos: Vec<TodoItem>) -> StoreResult<()> {
        self.snapshot.todos = todos;
        self.todo_writes += 1;
        Ok(())
    }

    fn set_current_date(&mut self, date: NaiveDate) -> StoreResult<()> {
        self.snapshot.current_date = date;
        Ok(())
    }
}
