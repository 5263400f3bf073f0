//! JSON snapshot file store.
//!
//! # Invariants
//! - The file is validated on open; invalid snapshots are rejected, never repaired.
//! - Writes go to a sibling temp file first and are renamed into place.

use super::{JournalStore, StoreError, StoreResult};
use crate::model::record::{AttendanceRecord, Student};
use crate::model::snapshot::JournalSnapshot;
use crate::model::todo::TodoItem;
use chrono::NaiveDate;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Journal store backed by one JSON snapshot file.
#[derive(Debug)]
pub struct SnapshotFileStore {
    path: PathBuf,
    snapshot: JournalSnapshot,
}

impl SnapshotFileStore {
    /// Opens and validates an existing snapshot file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        let path = path.as_ref().to_path_buf();

        match read_snapshot(&path) {
            Ok(snapshot) => {
                info!(
                    "event=snapshot_open module=store status=ok records={} todos={} duration_ms={}",
                    snapshot.records.len(),
                    snapshot.todos.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self { path, snapshot })
            }
            Err(err) => {
                error!(
                    "event=snapshot_open module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens `path`, or creates an empty snapshot there when it does not exist.
    pub fn open_or_create(path: impl AsRef<Path>, current_date: NaiveDate) -> StoreResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::open(path);
        }

        let store = Self {
            path: path.to_path_buf(),
            snapshot: JournalSnapshot::empty(current_date),
        };
        store.save()?;
        info!(
            "event=snapshot_create module=store status=ok current_date={}",
            current_date
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> &JournalSnapshot {
        &self.snapshot
    }

    /// Writes the current snapshot back to disk.
    pub fn save(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let body = serde_json::to_vec_pretty(&self.snapshot)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, body).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

impl JournalStore for SnapshotFileStore {
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
        let previous = std::mem::replace(&mut self.snapshot.todos, todos);
        if let Err(err) = self.save() {
            self.snapshot.todos = previous;
            return Err(err);
        }
        Ok(())
    }

    fn set_current_date(&mut self, date: NaiveDate) -> StoreResult<()> {
        let previous = std::mem::replace(&mut self.snapshot.current_date, date);
        if let Err(err) = self.save() {
            self.snapshot.current_date = previous;
            return Err(err);
        }
        Ok(())
    }
}

fn read_snapshot(path: &Path) -> StoreResult<JournalSnapshot> {
    let body = std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: JournalSnapshot = serde_json::from_slice(&body)?;
    snapshot.validate()?;
    Ok(snapshot)
}
