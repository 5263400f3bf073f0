//! Recent classroom atmosphere statistics.
//!
//! # Invariants
//! - The window is `today - ATMOSPHERE_WINDOW_DAYS ..` in calendar days and
//!   does not depend on the selected journal date.
//! - Histogram entries have non-zero counts, sorted by count descending;
//!   ties keep `Atmosphere::ALL` order.

use crate::model::record::{AttendanceRecord, Atmosphere};
use chrono::{Days, NaiveDate};
use serde::Serialize;

pub const ATMOSPHERE_WINDOW_DAYS: u64 = 30;

/// Frequency of one atmosphere in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtmosphereCount {
    pub atmosphere: Atmosphere,
    pub label: &'static str,
    pub emoji: &'static str,
    pub count: usize,
}

/// One cell of the calendar strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtmosphereDay {
    pub date: NaiveDate,
    pub atmosphere: Atmosphere,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtmosphereStats {
    /// First date included in the window.
    pub window_start: NaiveDate,
    pub histogram: Vec<AtmosphereCount>,
    /// Window records, oldest first.
    pub days: Vec<AtmosphereDay>,
}

impl AtmosphereStats {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Computes the histogram and calendar strip for records in the window
/// ending at `today`.
pub fn atmosphere_stats(records: &[AttendanceRecord], today: NaiveDate) -> AtmosphereStats {
    let window_start = today
        .checked_sub_days(Days::new(ATMOSPHERE_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);

    let mut recent: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|record| record.date >= window_start)
        .collect();
    recent.sort_by_key(|record| record.date);

    let mut histogram: Vec<AtmosphereCount> = Atmosphere::ALL
        .iter()
        .map(|&atmosphere| AtmosphereCount {
            atmosphere,
            label: atmosphere.label(),
            emoji: atmosphere.emoji(),
            count: recent
                .iter()
                .filter(|record| record.atmosphere == atmosphere)
                .count(),
        })
        .filter(|entry| entry.count > 0)
        .collect();
    // Stable sort keeps enumeration order for ties.
    histogram.sort_by(|a, b| b.count.cmp(&a.count));

    let days = recent
        .iter()
        .map(|record| AtmosphereDay {
            date: record.date,
            atmosphere: record.atmosphere,
        })
        .collect();

    AtmosphereStats {
        window_start,
        histogram,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::atmosphere_stats;
    use crate::model::record::{AttendanceRecord, Atmosphere, Weather};
    use chrono::{Days, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
    }

    fn days_ago(n: u64, atmosphere: Atmosphere) -> AttendanceRecord {
        AttendanceRecord {
            date: today().checked_sub_days(Days::new(n)).unwrap(),
            attendance: Vec::new(),
            weather: Weather::Cloudy,
            atmosphere,
        }
    }

    #[test]
    fn window_includes_thirty_days_and_excludes_thirty_one() {
        let records = vec![
            days_ago(31, Atmosphere::Tense),
            days_ago(30, Atmosphere::Calm),
            days_ago(29, Atmosphere::Joyful),
        ];

        let stats = atmosphere_stats(&records, today());
        let kinds: Vec<_> = stats.days.iter().map(|day| day.atmosphere).collect();
        assert_eq!(kinds, vec![Atmosphere::Calm, Atmosphere::Joyful]);
        assert!(stats
            .histogram
            .iter()
            .all(|entry| entry.atmosphere != Atmosphere::Tense));
    }

    #[test]
    fn histogram_sorts_by_count_with_enumeration_tiebreak() {
        let records = vec![
            days_ago(1, Atmosphere::Tired),
            days_ago(2, Atmosphere::Joyful),
            days_ago(3, Atmosphere::Tired),
            days_ago(4, Atmosphere::Calm),
        ];

        let stats = atmosphere_stats(&records, today());
        let order: Vec<_> = stats
            .histogram
            .iter()
            .map(|entry| (entry.atmosphere, entry.count))
            .collect();
        assert_eq!(
            order,
            vec![
                (Atmosphere::Tired, 2),
                (Atmosphere::Calm, 1),
                (Atmosphere::Joyful, 1),
            ]
        );
    }

    #[test]
    fn calendar_strip_is_chronological() {
        let records = vec![
            days_ago(1, Atmosphere::Calm),
            days_ago(5, Atmosphere::Tense),
            days_ago(3, Atmosphere::Joyful),
        ];

        let stats = atmosphere_stats(&records, today());
        let dates: Vec<_> = stats.days.iter().map(|day| day.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn no_recent_records_yields_empty_stats() {
        let stats = atmosphere_stats(&[days_ago(90, Atmosphere::Calm)], today());
        assert!(stats.is_empty());
        assert!(stats.histogram.is_empty());
    }
}
