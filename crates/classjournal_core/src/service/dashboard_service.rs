//! Dashboard use-case service.
//!
//! # Responsibility
//! - Compose the attendance, trend, and atmosphere projections for one
//!   selected day from the store's current records.
//!
//! # Invariants
//! - Nothing is cached; every call recomputes from the store.
//! - The atmosphere window uses the caller's `today`, not the selected day.

use crate::model::record::{Atmosphere, Weather};
use crate::stats::atmosphere::{atmosphere_stats, AtmosphereStats};
use crate::stats::attendance::{
    attendance_breakdown, attendance_trend, AttendanceBreakdown, TrendPoint,
};
use crate::store::JournalStore;
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Summary card for the selected day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// `None` when the day has no record.
    pub weather: Option<Weather>,
    pub atmosphere: Option<Atmosphere>,
    pub student_count: usize,
    pub record_count: usize,
}

/// Everything the dashboard renders for one selected day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub attendance: AttendanceBreakdown,
    pub trend: Vec<TrendPoint>,
    /// Upper bound for the trend axis; the class size.
    pub trend_ceiling: usize,
    pub atmosphere: AtmosphereStats,
    pub summary: DailySummary,
}

pub struct DashboardService<S: JournalStore> {
    store: S,
}

impl<S: JournalStore> DashboardService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Builds the dashboard for `selected_date` with the atmosphere window
    /// ending at `today`.
    pub fn dashboard(&self, selected_date: NaiveDate, today: NaiveDate) -> DashboardView {
        let records = self.store.records();
        let student_count = self.store.students().len();
        let selected = records.iter().find(|record| record.date == selected_date);

        DashboardView {
            attendance: attendance_breakdown(records, selected_date),
            trend: attendance_trend(records, selected_date),
            trend_ceiling: student_count,
            atmosphere: atmosphere_stats(records, today),
            summary: DailySummary {
                date: selected_date,
                weather: selected.map(|record| record.weather),
                atmosphere: selected.map(|record| record.atmosphere),
                student_count,
                record_count: records.len(),
            },
        }
    }

    /// Dashboard for the store's current date, windowed at the local today.
    pub fn current_dashboard(&self) -> DashboardView {
        self.dashboard(self.store.current_date(), local_today())
    }

    /// Atmosphere statistics for the window ending at the local today.
    pub fn recent_atmosphere(&self) -> AtmosphereStats {
        atmosphere_stats(self.store.records(), local_today())
    }
}

/// Local calendar date at the moment of the call.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::DashboardService;
    use crate::model::record::{AttendanceRecord, Atmosphere, Student, Weather};
    use crate::model::snapshot::JournalSnapshot;
    use crate::store::MemoryJournalStore;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn store() -> MemoryJournalStore {
        let mut snapshot = JournalSnapshot::empty(day(2));
        snapshot.students = vec![
            Student {
                id: "s1".to_string(),
                name: "Kim".to_string(),
            },
            Student {
                id: "s2".to_string(),
                name: "Lee".to_string(),
            },
        ];
        snapshot.records = vec![AttendanceRecord {
            date: day(1),
            attendance: Vec::new(),
            weather: Weather::Snowy,
            atmosphere: Atmosphere::Harmonious,
        }];
        MemoryJournalStore::new(snapshot).unwrap()
    }

    #[test]
    fn summary_reports_recorded_day() {
        let service = DashboardService::new(store());
        let view = service.dashboard(day(1), day(3));

        assert_eq!(view.summary.weather, Some(Weather::Snowy));
        assert_eq!(view.summary.atmosphere, Some(Atmosphere::Harmonious));
        assert_eq!(view.summary.student_count, 2);
        assert_eq!(view.trend_ceiling, 2);
        assert_eq!(view.atmosphere.days.len(), 1);
    }

    #[test]
    fn unrecorded_day_has_empty_breakdown_but_prior_trend() {
        let service = DashboardService::new(store());
        let view = service.dashboard(day(2), day(3));

        assert!(view.attendance.is_empty());
        assert_eq!(view.summary.weather, None);
        assert_eq!(view.trend.len(), 1);
        assert_eq!(view.summary.record_count, 1);
    }
}
