use chrono::NaiveDate;
use classjournal_core::{
    export_rows, record_rows, todo_rows, try_export_rows, AttendanceEntry, AttendanceRecord,
    AttendanceStatus, Atmosphere, ExportError, ExportOutcome, ExportRequest, Student, TodoId,
    TodoItem, Weather,
};
use serde_json::json;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn sample_records() -> (Vec<AttendanceRecord>, Vec<Student>) {
    let students = vec![
        Student {
            id: "s1".to_string(),
            name: "Kim".to_string(),
        },
        Student {
            id: "s2".to_string(),
            name: "Park".to_string(),
        },
    ];
    let records = vec![AttendanceRecord {
        date: day(4),
        attendance: vec![
            AttendanceEntry {
                student_id: "s1".to_string(),
                status: AttendanceStatus::Present,
            },
            AttendanceEntry {
                student_id: "s2".to_string(),
                status: AttendanceStatus::EarlyLeave,
            },
        ],
        weather: Weather::Foggy,
        atmosphere: Atmosphere::Calm,
    }];
    (records, students)
}

#[test]
fn record_export_writes_xlsx_file() {
    let dir = tempfile::tempdir().unwrap();
    let (records, students) = sample_records();
    let rows = record_rows(&records, &students);
    let request = ExportRequest::from_serializable(&rows, "출결 기록")
        .unwrap()
        .with_sheet_name("Attendance");

    let outcome = export_rows(&request, dir.path());
    let expected = dir.path().join("출결 기록.xlsx");
    assert_eq!(outcome, ExportOutcome::Written(expected.clone()));

    let bytes = std::fs::read(expected).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn serialized_rows_keep_field_order_as_columns() {
    let (records, students) = sample_records();
    let request = ExportRequest::from_serializable(&record_rows(&records, &students), "x").unwrap();

    let header = classjournal_core::export::header_keys(&request.rows);
    assert_eq!(
        header,
        vec!["날짜", "날씨", "분위기", "출석", "결석", "지각", "조퇴", "재적", "비고"]
    );
    assert_eq!(request.rows[0]["비고"], json!("Park(조퇴)"));
}

#[test]
fn empty_rows_short_circuit_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let request = ExportRequest::from_serializable(&todo_rows(&[]), "todos").unwrap();

    assert_eq!(export_rows(&request, dir.path()), ExportOutcome::SkippedEmpty);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn failures_are_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let todos = vec![TodoItem::new(TodoId::parse("t1").unwrap(), "Grade papers", day(1))];
    let request = ExportRequest::from_serializable(&todo_rows(&todos), "todos")
        .unwrap()
        .with_sheet_name("bad[name]");

    let outcome = export_rows(&request, dir.path());
    assert!(matches!(outcome, ExportOutcome::Failed(_)));
    assert!(matches!(
        try_export_rows(&request, dir.path()),
        Err(ExportError::Xlsx(_))
    ));
}

#[test]
fn non_object_rows_are_rejected() {
    let err = ExportRequest::from_serializable(&[1, 2, 3], "numbers").unwrap_err();
    assert!(matches!(err, ExportError::RowNotObject { index: 0 }));
}

#[test]
fn default_sheet_name_is_sheet1() {
    let request = ExportRequest::new(vec![json!({ "a": 1 }).as_object().unwrap().clone()], "a");
    assert_eq!(request.effective_sheet_name(), "Sheet1");
}
