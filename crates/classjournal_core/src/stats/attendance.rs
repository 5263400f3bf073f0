//! Attendance statistics.
//!
//! # Invariants
//! - Breakdown slices follow `AttendanceStatus::ALL` order and never carry
//!   a zero count.
//! - Trend points are ordered oldest first and never padded.

use crate::model::record::{AttendanceRecord, AttendanceStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Maximum number of records in the attendance trend.
pub const TREND_WINDOW: usize = 7;

/// One non-empty attendance category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceSlice {
    pub status: AttendanceStatus,
    pub label: &'static str,
    pub count: usize,
}

/// Attendance counts for one day. Empty when the day has no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceBreakdown {
    pub date: NaiveDate,
    pub slices: Vec<AttendanceSlice>,
}

impl AttendanceBreakdown {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|slice| slice.count).sum()
    }

    /// Count for `status`; zero when the slice was dropped.
    pub fn count_of(&self, status: AttendanceStatus) -> usize {
        self.slices
            .iter()
            .find(|slice| slice.status == status)
            .map_or(0, |slice| slice.count)
    }
}

/// One bar of the attendance trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// `MM-DD` portion of the date.
    pub label: String,
    pub present_count: usize,
}

/// Counts the record of `current_date` by status.
pub fn attendance_breakdown(
    records: &[AttendanceRecord],
    current_date: NaiveDate,
) -> AttendanceBreakdown {
    let slices: Vec<AttendanceSlice> = records
        .iter()
        .find(|record| record.date == current_date)
        .map(|record| {
            AttendanceStatus::ALL
                .iter()
                .map(|&status| AttendanceSlice {
                    status,
                    label: status.label(),
                    count: record.count_status(status),
                })
                .filter(|slice| slice.count > 0)
                .collect()
        })
        .unwrap_or_default();

    AttendanceBreakdown {
        date: current_date,
        slices,
    }
}

/// Present counts for the last `TREND_WINDOW` records up to `current_date`.
///
/// When `current_date` has a record the window ends at it; otherwise it ends
/// at the latest earlier record. Dates are unique, so both cases reduce to
/// the tail of the records dated on or before `current_date`.
pub fn attendance_trend(records: &[AttendanceRecord], current_date: NaiveDate) -> Vec<TrendPoint> {
    let mut history: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|record| record.date <= current_date)
        .collect();
    history.sort_by_key(|record| record.date);

    let start = history.len().saturating_sub(TREND_WINDOW);
    history[start..]
        .iter()
        .map(|record| TrendPoint {
            date: record.date,
            label: record.date.format("%m-%d").to_string(),
            present_count: record.present_count(),
        })
        .collect()
}
