use chrono::{Days, NaiveDate};
use classjournal_core::{
    atmosphere_stats, attendance_breakdown, attendance_trend, AttendanceEntry, AttendanceRecord,
    AttendanceStatus, Atmosphere, DashboardService, JournalSnapshot, MemoryJournalStore, Weather,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(day: NaiveDate, statuses: &[AttendanceStatus], atmosphere: Atmosphere) -> AttendanceRecord {
    AttendanceRecord {
        date: day,
        attendance: statuses
            .iter()
            .enumerate()
            .map(|(n, &status)| AttendanceEntry {
                student_id: format!("s{n}"),
                status,
            })
            .collect(),
        weather: Weather::Sunny,
        atmosphere,
    }
}

#[test]
fn breakdown_matches_dashboard_categories() {
    use AttendanceStatus::{Absent, Late, Present};
    let today = date(2024, 3, 1);
    let records = vec![record(today, &[Present, Present, Absent, Late], Atmosphere::Calm)];

    let breakdown = attendance_breakdown(&records, today);
    let pairs: Vec<_> = breakdown
        .slices
        .iter()
        .map(|slice| (slice.label, slice.count))
        .collect();
    assert_eq!(pairs, vec![("출석", 2), ("결석", 1), ("지각", 1)]);
}

#[test]
fn trend_with_short_history_returns_available_prior_records() {
    let records = vec![
        record(date(2024, 2, 28), &[AttendanceStatus::Present], Atmosphere::Calm),
        record(date(2024, 2, 26), &[], Atmosphere::Calm),
        record(date(2024, 3, 9), &[AttendanceStatus::Present], Atmosphere::Calm),
    ];

    let trend = attendance_trend(&records, date(2024, 3, 1));
    let labels: Vec<_> = trend.iter().map(|point| point.label.as_str()).collect();
    assert_eq!(labels, vec!["02-26", "02-28"]);
    assert_eq!(trend[1].present_count, 1);
}

#[test]
fn trend_with_no_prior_history_is_empty() {
    let records = vec![record(date(2024, 3, 9), &[], Atmosphere::Calm)];
    assert!(attendance_trend(&records, date(2024, 3, 1)).is_empty());
}

#[test]
fn atmosphere_window_spans_thirty_calendar_days() {
    let today = date(2024, 3, 1);
    let ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap();
    let records = vec![
        record(ago(30), &[], Atmosphere::Passionate),
        record(ago(31), &[], Atmosphere::Distracted),
        record(ago(29), &[], Atmosphere::Energetic),
    ];

    let stats = atmosphere_stats(&records, today);
    let included: Vec<_> = stats.days.iter().map(|day| day.atmosphere).collect();
    assert_eq!(included, vec![Atmosphere::Passionate, Atmosphere::Energetic]);
    assert_eq!(stats.window_start, ago(30));
}

#[test]
fn dashboard_window_is_independent_of_selected_date() {
    let mut snapshot = JournalSnapshot::empty(date(2024, 1, 1));
    snapshot.records = vec![
        record(date(2024, 1, 1), &[], Atmosphere::Tense),
        record(date(2024, 3, 1), &[], Atmosphere::Joyful),
    ];
    let service = DashboardService::new(MemoryJournalStore::new(snapshot).unwrap());

    let view = service.dashboard(date(2024, 1, 1), date(2024, 3, 5));
    assert_eq!(view.summary.atmosphere, Some(Atmosphere::Tense));
    assert_eq!(view.atmosphere.days.len(), 1);
    assert_eq!(view.atmosphere.histogram[0].atmosphere, Atmosphere::Joyful);
}
