//! Journal domain model.
//!
//! # Responsibility
//! - Define the canonical records, students, and todo items shared by the
//!   store, services, statistics, and export layers.
//! - Keep wire names compatible with existing journal snapshots.
//!
//! # Invariants
//! - Every todo item is identified by a stable `TodoId`.
//! - At most one attendance record exists per calendar date.

pub mod record;
pub mod snapshot;
pub mod todo;

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for journal model data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Todo id is empty after trim.
    BlankTodoId,
    /// Two todo items share one id.
    DuplicateTodoId(String),
    /// Two attendance records share one date.
    DuplicateRecordDate(NaiveDate),
    /// Date text is not `YYYY-MM-DD`.
    InvalidDate(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTodoId => write!(f, "todo id must not be blank"),
            Self::DuplicateTodoId(id) => write!(f, "duplicate todo id `{id}`"),
            Self::DuplicateRecordDate(date) => {
                write!(f, "duplicate attendance record for date {date}")
            }
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for ModelValidationError {}

/// Parses a journal date in `YYYY-MM-DD` form.
///
/// Surrounding whitespace is ignored.
pub fn parse_journal_date(value: &str) -> Result<NaiveDate, ModelValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ModelValidationError::InvalidDate(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_journal_date, ModelValidationError};
    use chrono::NaiveDate;

    #[test]
    fn parse_journal_date_accepts_iso_dates() {
        assert_eq!(
            parse_journal_date(" 2024-03-01 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn parse_journal_date_rejects_other_shapes() {
        let err = parse_journal_date("03/01/2024").unwrap_err();
        assert_eq!(err, ModelValidationError::InvalidDate("03/01/2024".to_string()));
    }
}
