//! Row builders for journal exports.

use crate::model::record::{AttendanceRecord, AttendanceStatus, Student};
use crate::model::todo::TodoItem;
use serde::Serialize;
use std::collections::HashMap;

/// One attendance record as a spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    #[serde(rename = "날짜")]
    pub date: String,
    #[serde(rename = "날씨")]
    pub weather: &'static str,
    #[serde(rename = "분위기")]
    pub atmosphere: &'static str,
    #[serde(rename = "출석")]
    pub present: usize,
    #[serde(rename = "결석")]
    pub absent: usize,
    #[serde(rename = "지각")]
    pub late: usize,
    #[serde(rename = "조퇴")]
    pub early_leave: usize,
    #[serde(rename = "재적")]
    pub enrolled: usize,
    /// Non-present students as `name(status)`, comma separated.
    #[serde(rename = "비고")]
    pub note: String,
}

/// One todo item as a spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoRow {
    #[serde(rename = "날짜")]
    pub date: String,
    #[serde(rename = "할 일")]
    pub content: String,
    #[serde(rename = "완료")]
    pub completed: bool,
}

/// Builds one row per record, oldest first.
///
/// Unknown student ids are shown by id.
pub fn record_rows(records: &[AttendanceRecord], students: &[Student]) -> Vec<RecordRow> {
    let names: HashMap<&str, &str> = students
        .iter()
        .map(|student| (student.id.as_str(), student.name.as_str()))
        .collect();

    let mut sorted: Vec<&AttendanceRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.date);

    sorted
        .into_iter()
        .map(|record| {
            let note = record
                .attendance
                .iter()
                .filter(|entry| entry.status != AttendanceStatus::Present)
                .map(|entry| {
                    let name = names
                        .get(entry.student_id.as_str())
                        .copied()
                        .unwrap_or(entry.student_id.as_str());
                    format!("{name}({})", entry.status.label())
                })
                .collect::<Vec<_>>()
                .join(", ");

            RecordRow {
                date: record.date.to_string(),
                weather: record.weather.name(),
                atmosphere: record.atmosphere.label(),
                present: record.count_status(AttendanceStatus::Present),
                absent: record.count_status(AttendanceStatus::Absent),
                late: record.count_status(AttendanceStatus::Late),
                early_leave: record.count_status(AttendanceStatus::EarlyLeave),
                enrolled: students.len(),
                note,
            }
        })
        .collect()
}

/// Builds one row per todo in global list order.
pub fn todo_rows(todos: &[TodoItem]) -> Vec<TodoRow> {
    todos
        .iter()
        .map(|todo| TodoRow {
            date: todo.due_date.to_string(),
            content: todo.content.clone(),
            completed: todo.completed,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::record_rows;
    use crate::model::record::{
        AttendanceEntry, AttendanceRecord, AttendanceStatus, Atmosphere, Student, Weather,
    };
    use chrono::NaiveDate;

    #[test]
    fn record_rows_name_non_present_students() {
        let students = vec![Student {
            id: "s1".to_string(),
            name: "Kim".to_string(),
        }];
        let records = vec![AttendanceRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            attendance: vec![
                AttendanceEntry {
                    student_id: "s1".to_string(),
                    status: AttendanceStatus::Late,
                },
                AttendanceEntry {
                    student_id: "s9".to_string(),
                    status: AttendanceStatus::Absent,
                },
            ],
            weather: Weather::Windy,
            atmosphere: Atmosphere::Tired,
        }];

        let rows = record_rows(&records, &students);
        assert_eq!(rows[0].note, "Kim(지각), s9(결석)");
        assert_eq!(rows[0].atmosphere, "피곤함");
        assert_eq!(rows[0].enrolled, 1);
    }
}
