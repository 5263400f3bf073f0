//! Core domain logic for the class journal dashboard.
//! This crate is the single source of truth for todo ordering and
//! record statistics.

pub mod export;
pub mod logging;
pub mod model;
pub mod service;
pub mod stats;
pub mod store;

pub use export::{
    export_rows, record_rows, todo_rows, try_export_rows, ExportError, ExportOutcome,
    ExportRequest, ExportRow,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, Atmosphere, Student, Weather,
};
pub use model::snapshot::JournalSnapshot;
pub use model::todo::{MoveDirection, TodoId, TodoItem, TodoList};
pub use model::{parse_journal_date, ModelValidationError};
pub use service::dashboard_service::{local_today, DailySummary, DashboardService, DashboardView};
pub use service::todo_service::{TodoChange, TodoService, TodoServiceError, TodoServiceResult};
pub use stats::atmosphere::{atmosphere_stats, AtmosphereCount, AtmosphereDay, AtmosphereStats};
pub use stats::attendance::{
    attendance_breakdown, attendance_trend, AttendanceBreakdown, AttendanceSlice, TrendPoint,
};
pub use store::{JournalStore, MemoryJournalStore, SnapshotFileStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
