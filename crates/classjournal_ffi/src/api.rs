//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose dashboard, todo, and export use-cases to Dart via FRB.
//! - Keep error semantics simple: envelopes carry `ok` plus a message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.
//! - Snapshot access is serialized through one process-wide lock.

use chrono::NaiveDate;
use classjournal_core::{
    core_version as core_version_inner, export_rows, init_logging as init_logging_inner,
    local_today, parse_journal_date, ping as ping_inner, record_rows, todo_rows, DashboardService,
    DashboardView, ExportOutcome, ExportRequest, JournalStore, SnapshotFileStore, TodoChange,
    TodoId, TodoItem, TodoService,
};
use log::error;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const SNAPSHOT_FILE_NAME: &str = "classjournal_snapshot.json";
const SNAPSHOT_PATH_ENV: &str = "CLASSJOURNAL_SNAPSHOT_PATH";
const EXPORT_DIR_ENV: &str = "CLASSJOURNAL_EXPORT_DIR";
static SNAPSHOT_PATH: OnceLock<PathBuf> = OnceLock::new();
static SNAPSHOT_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Todo item as seen by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub id: String,
    pub content: String,
    pub completed: bool,
    pub due_date: String,
}

/// Date view of the todo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub ok: bool,
    pub date: String,
    pub items: Vec<TodoItemView>,
    pub message: String,
}

/// Result of one todo mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    /// `false` for no-ops (blank content, missing id, edge moves).
    pub changed: bool,
    pub todo_id: Option<String>,
    pub message: String,
}

impl TodoActionResponse {
    fn applied(message: impl Into<String>, todo_id: Option<String>) -> Self {
        Self {
            ok: true,
            changed: true,
            todo_id,
            message: message.into(),
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed: false,
            todo_id: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            todo_id: None,
            message: message.into(),
        }
    }
}

/// Labelled count used by every chart series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub key: String,
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtmosphereDayView {
    pub date: String,
    pub key: String,
    pub label: String,
    pub emoji: String,
}

/// Dashboard payload for one selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub message: String,
    pub date: String,
    pub attendance: Vec<ChartEntry>,
    /// Trend bars keyed by `MM-DD`.
    pub trend: Vec<ChartEntry>,
    pub trend_ceiling: u32,
    pub atmosphere: Vec<ChartEntry>,
    pub atmosphere_days: Vec<AtmosphereDayView>,
    pub weather: Option<String>,
    pub today_atmosphere: Option<String>,
    pub student_count: u32,
    pub record_count: u32,
}

impl DashboardResponse {
    fn failure(date: String, message: String) -> Self {
        Self {
            ok: false,
            message,
            date,
            attendance: Vec::new(),
            trend: Vec::new(),
            trend_ceiling: 0,
            atmosphere: Vec::new(),
            atmosphere_days: Vec::new(),
            weather: None,
            today_atmosphere: None,
            student_count: 0,
            record_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub path: Option<String>,
    pub message: String,
}

/// Builds the dashboard for `date` (or the stored current date).
#[flutter_rust_bridge::frb(sync)]
pub fn journal_dashboard(date: Option<String>) -> DashboardResponse {
    let requested = date.clone().unwrap_or_default();
    let result = with_store(|store| {
        let selected = resolve_date(date.as_deref(), store)?;
        let view = DashboardService::new(&mut *store).dashboard(selected, local_today());
        Ok(to_dashboard_response(selected, view))
    });
    match result {
        Ok(response) => response,
        Err(err) => DashboardResponse::failure(requested, format!("journal_dashboard failed: {err}")),
    }
}

/// Lists todos due on `date` (or the stored current date) in list order.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list(date: Option<String>) -> TodoListResponse {
    let result = with_store(|store| {
        let selected = resolve_date(date.as_deref(), store)?;
        let service = TodoService::new(&mut *store);
        let items = service.view(selected).map(to_todo_view).collect::<Vec<_>>();
        Ok((selected, items))
    });
    match result {
        Ok((selected, items)) => TodoListResponse {
            ok: true,
            date: selected.to_string(),
            message: format!("{} item(s).", items.len()),
            items,
        },
        Err(err) => TodoListResponse {
            ok: false,
            date: date.unwrap_or_default(),
            items: Vec::new(),
            message: format!("todo_list failed: {err}"),
        },
    }
}

/// Adds a todo due on `date` (or the stored current date).
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(content: String, date: Option<String>) -> TodoActionResponse {
    let result = with_store(|store| {
        let selected = resolve_date(date.as_deref(), store)?;
        TodoService::new(&mut *store)
            .add(selected, content)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(Some(id)) => TodoActionResponse::applied("Todo added.", Some(id.to_string())),
        Ok(None) => TodoActionResponse::unchanged("Todo content is empty."),
        Err(err) => TodoActionResponse::failure(format!("todo_add failed: {err}")),
    }
}

/// Flips completion of one todo.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(todo_id: String) -> TodoActionResponse {
    run_todo_change("todo_toggle", &todo_id, |service, _, id| service.toggle(id))
}

/// Deletes one todo.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(todo_id: String) -> TodoActionResponse {
    run_todo_change("todo_delete", &todo_id, |service, _, id| service.delete(id))
}

/// Moves one todo up within the view of `date` (or the stored current date).
#[flutter_rust_bridge::frb(sync)]
pub fn todo_move_up(todo_id: String, date: Option<String>) -> TodoActionResponse {
    run_dated_todo_change("todo_move_up", &todo_id, date, |service, selected, id| {
        service.move_up(selected, id)
    })
}

/// Moves one todo down within the view of `date` (or the stored current date).
#[flutter_rust_bridge::frb(sync)]
pub fn todo_move_down(todo_id: String, date: Option<String>) -> TodoActionResponse {
    run_dated_todo_change("todo_move_down", &todo_id, date, |service, selected, id| {
        service.move_down(selected, id)
    })
}

/// Exports all attendance records to `<filename>.xlsx`.
#[flutter_rust_bridge::frb(sync)]
pub fn export_records(filename: String) -> ExportResponse {
    let request = with_store(|store| {
        let rows = record_rows(store.records(), store.students());
        ExportRequest::from_serializable(&rows, filename)
            .map(|request| request.with_sheet_name("출결"))
            .map_err(|err| err.to_string())
    });
    finish_export(request)
}

/// Exports the whole todo list to `<filename>.xlsx`.
#[flutter_rust_bridge::frb(sync)]
pub fn export_todos(filename: String) -> ExportResponse {
    let request = with_store(|store| {
        let rows = todo_rows(store.todos());
        ExportRequest::from_serializable(&rows, filename)
            .map(|request| request.with_sheet_name("할 일"))
            .map_err(|err| err.to_string())
    });
    finish_export(request)
}

fn finish_export(request: Result<ExportRequest, String>) -> ExportResponse {
    let request = match request {
        Ok(request) => request,
        Err(err) => {
            return ExportResponse {
                ok: false,
                path: None,
                message: format!("export failed: {err}"),
            }
        }
    };

    match export_rows(&request, &resolve_export_dir()) {
        ExportOutcome::Written(path) => ExportResponse {
            ok: true,
            path: Some(path.display().to_string()),
            message: "Export written.".to_string(),
        },
        ExportOutcome::SkippedEmpty => ExportResponse {
            ok: true,
            path: None,
            message: "Nothing to export.".to_string(),
        },
        ExportOutcome::Failed(err) => ExportResponse {
            ok: false,
            path: None,
            message: format!("export failed: {err}"),
        },
    }
}

fn run_todo_change(
    operation: &str,
    todo_id: &str,
    change: impl FnOnce(
        &mut TodoService<&mut SnapshotFileStore>,
        NaiveDate,
        &TodoId,
    ) -> classjournal_core::TodoServiceResult<TodoChange>,
) -> TodoActionResponse {
    run_dated_todo_change(operation, todo_id, None, change)
}

fn run_dated_todo_change(
    operation: &str,
    todo_id: &str,
    date: Option<String>,
    change: impl FnOnce(
        &mut TodoService<&mut SnapshotFileStore>,
        NaiveDate,
        &TodoId,
    ) -> classjournal_core::TodoServiceResult<TodoChange>,
) -> TodoActionResponse {
    let id = match TodoId::parse(todo_id) {
        Ok(id) => id,
        Err(err) => return TodoActionResponse::failure(format!("{operation} failed: {err}")),
    };

    let result = with_store(|store| {
        let selected = resolve_date(date.as_deref(), store)?;
        let mut service = TodoService::new(store);
        change(&mut service, selected, &id).map_err(|err| err.to_string())
    });
    match result {
        Ok(TodoChange::Applied) => TodoActionResponse::applied("Todo updated.", Some(id.to_string())),
        Ok(TodoChange::Unchanged) => TodoActionResponse::unchanged("Nothing to change."),
        Err(err) => TodoActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn with_store<T>(f: impl FnOnce(&mut SnapshotFileStore) -> Result<T, String>) -> Result<T, String> {
    let _guard = SNAPSHOT_LOCK
        .lock()
        .map_err(|_| "snapshot lock poisoned".to_string())?;
    let mut store = SnapshotFileStore::open_or_create(resolve_snapshot_path(), local_today())
        .map_err(|err| {
            error!("event=ffi_store_open module=ffi status=error error={err}");
            format!("snapshot open failed: {err}")
        })?;
    f(&mut store)
}

fn resolve_date(date: Option<&str>, store: &SnapshotFileStore) -> Result<NaiveDate, String> {
    match date.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_journal_date(value).map_err(|err| err.to_string()),
        None => Ok(store.current_date()),
    }
}

fn resolve_snapshot_path() -> PathBuf {
    SNAPSHOT_PATH
        .get_or_init(|| {
            env_path(SNAPSHOT_PATH_ENV)
                .unwrap_or_else(|| std::env::temp_dir().join(SNAPSHOT_FILE_NAME))
        })
        .clone()
}

fn resolve_export_dir() -> PathBuf {
    env_path(EXPORT_DIR_ENV).unwrap_or_else(std::env::temp_dir)
}

fn env_path(key: &str) -> Option<PathBuf> {
    let raw = std::env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

fn to_todo_view(item: &TodoItem) -> TodoItemView {
    TodoItemView {
        id: item.id.to_string(),
        content: item.content.clone(),
        completed: item.completed,
        due_date: item.due_date.to_string(),
    }
}

fn to_dashboard_response(selected: NaiveDate, view: DashboardView) -> DashboardResponse {
    DashboardResponse {
        ok: true,
        message: if view.summary.weather.is_some() {
            "Record found.".to_string()
        } else {
            "No record for this date.".to_string()
        },
        date: selected.to_string(),
        attendance: view
            .attendance
            .slices
            .iter()
            .map(|slice| ChartEntry {
                key: format!("{:?}", slice.status),
                label: slice.label.to_string(),
                count: to_u32(slice.count),
            })
            .collect(),
        trend: view
            .trend
            .iter()
            .map(|point| ChartEntry {
                key: point.date.to_string(),
                label: point.label.clone(),
                count: to_u32(point.present_count),
            })
            .collect(),
        trend_ceiling: to_u32(view.trend_ceiling),
        atmosphere: view
            .atmosphere
            .histogram
            .iter()
            .map(|entry| ChartEntry {
                key: format!("{:?}", entry.atmosphere),
                label: format!("{} {}", entry.emoji, entry.label),
                count: to_u32(entry.count),
            })
            .collect(),
        atmosphere_days: view
            .atmosphere
            .days
            .iter()
            .map(|day| AtmosphereDayView {
                date: day.date.to_string(),
                key: format!("{:?}", day.atmosphere),
                label: day.atmosphere.label().to_string(),
                emoji: day.atmosphere.emoji().to_string(),
            })
            .collect(),
        weather: view.summary.weather.map(|weather| weather.name().to_string()),
        today_atmosphere: view
            .summary
            .atmosphere
            .map(|atmosphere| atmosphere.label().to_string()),
        student_count: to_u32(view.summary.student_count),
        record_count: to_u32(view.summary.record_count),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, journal_dashboard, ping, todo_add, todo_delete, todo_list,
        todo_move_down, todo_move_up, todo_toggle,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn todo_add_then_list_and_reorder() {
        let date = Some("2031-05-06".to_string());
        let first = todo_add("prepare quiz".to_string(), date.clone());
        let second = todo_add("call parents".to_string(), date.clone());
        assert!(first.ok && first.changed, "{}", first.message);
        assert!(second.ok && second.changed, "{}", second.message);
        let first_id = first.todo_id.expect("add should return todo_id");
        let second_id = second.todo_id.expect("add should return todo_id");

        let moved = todo_move_up(second_id.clone(), date.clone());
        assert!(moved.changed, "{}", moved.message);

        let listed = todo_list(date.clone());
        assert!(listed.ok, "{}", listed.message);
        let ids: Vec<_> = listed
            .items
            .iter()
            .map(|item| item.id.clone())
            .filter(|id| *id == first_id || *id == second_id)
            .collect();
        assert_eq!(ids, vec![second_id.clone(), first_id.clone()]);

        let edge = todo_move_down(first_id.clone(), date.clone());
        assert!(edge.ok && !edge.changed);

        assert!(todo_toggle(first_id.clone()).changed);
        assert!(todo_delete(first_id.clone()).changed);
        assert!(todo_delete(second_id).changed);
        assert!(todo_list(date).items.is_empty());
    }

    #[test]
    fn blank_add_is_unchanged() {
        let response = todo_add("   ".to_string(), Some("2031-05-07".to_string()));
        assert!(response.ok);
        assert!(!response.changed);
    }

    #[test]
    fn invalid_date_is_reported() {
        let response = todo_list(Some("05/06/2031".to_string()));
        assert!(!response.ok);
        assert!(response.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn dashboard_for_unrecorded_day_is_empty() {
        let response = journal_dashboard(Some("1999-01-01".to_string()));
        assert!(response.ok, "{}", response.message);
        assert!(response.attendance.is_empty());
        assert_eq!(response.weather, None);
    }
}
