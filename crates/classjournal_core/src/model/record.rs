//! Attendance record model.
//!
//! # Responsibility
//! - Define one day's attendance, weather, and classroom atmosphere entry.
//! - Provide the fixed category enumerations and their display labels.
//!
//! # Invariants
//! - `AttendanceStatus::ALL` and `Atmosphere::ALL` define the canonical
//!   category order used by every statistic.
//! - Records are keyed by `date`; ISO ordering equals chronological ordering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance state of one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    #[serde(rename = "Early Leave")]
    EarlyLeave,
}

impl AttendanceStatus {
    /// Canonical category order.
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::EarlyLeave,
    ];

    /// Display label used by the dashboard and exports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "출석",
            Self::Absent => "결석",
            Self::Late => "지각",
            Self::EarlyLeave => "조퇴",
        }
    }
}

/// Weather observed for a school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
    Stormy,
    Foggy,
}

impl Weather {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rainy",
            Self::Snowy => "Snowy",
            Self::Windy => "Windy",
            Self::Stormy => "Stormy",
            Self::Foggy => "Foggy",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Sunny => "☀️",
            Self::Cloudy => "☁️",
            Self::Rainy => "☔",
            Self::Snowy => "❄️",
            Self::Windy => "🌬️",
            Self::Stormy => "⚡",
            Self::Foggy => "🌫️",
        }
    }
}

/// Classroom mood recorded for a school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Atmosphere {
    Calm,
    Energetic,
    Joyful,
    Passionate,
    Harmonious,
    Distracted,
    Tense,
    Tired,
}

impl Atmosphere {
    /// Canonical category order. Histogram ties keep this order.
    pub const ALL: [Atmosphere; 8] = [
        Atmosphere::Calm,
        Atmosphere::Energetic,
        Atmosphere::Joyful,
        Atmosphere::Passionate,
        Atmosphere::Harmonious,
        Atmosphere::Distracted,
        Atmosphere::Tense,
        Atmosphere::Tired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Calm => "차분함",
            Self::Energetic => "활기참",
            Self::Joyful => "즐거움",
            Self::Passionate => "열정적",
            Self::Harmonious => "화목함",
            Self::Distracted => "산만함",
            Self::Tense => "긴장됨",
            Self::Tired => "피곤함",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Calm => "🧘",
            Self::Energetic => "🏃",
            Self::Joyful => "✨",
            Self::Passionate => "🔥",
            Self::Harmonious => "🤝",
            Self::Distracted => "🌀",
            Self::Tense => "🤐",
            Self::Tired => "🥱",
        }
    }
}

/// Enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
}

/// Attendance of one student within a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub student_id: String,
    pub status: AttendanceStatus,
}

/// One day's journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique key within a record set.
    pub date: NaiveDate,
    /// Entries in roll-call order.
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
    pub weather: Weather,
    pub atmosphere: Atmosphere,
}

impl AttendanceRecord {
    /// Counts entries with the given status.
    pub fn count_status(&self, status: AttendanceStatus) -> usize {
        self.attendance
            .iter()
            .filter(|entry| entry.status == status)
            .count()
    }

    pub fn present_count(&self) -> usize {
        self.count_status(AttendanceStatus::Present)
    }
}
