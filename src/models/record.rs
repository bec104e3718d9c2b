use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One identity's attendance for one effective day.
///
/// Field names follow the column layout of the per-identity table
/// (`date, first_tap_time, last_tap_time, hours, current_streak`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(rename = "date")]
    pub effective_date: NaiveDate,
    #[serde(rename = "first_tap_time")]
    pub first_tap: DateTime<FixedOffset>,
    #[serde(rename = "last_tap_time")]
    pub last_tap: DateTime<FixedOffset>,
    #[serde(rename = "hours")]
    pub hours_present: f64,
    pub current_streak: u32,
}

impl AttendanceRecord {
    /// First record of a day: one tap, zero hours.
    pub fn opened(
        effective_date: NaiveDate,
        tap: DateTime<FixedOffset>,
        current_streak: u32,
    ) -> Self {
        Self {
            effective_date,
            first_tap: tap,
            last_tap: tap,
            hours_present: 0.0,
            current_streak,
        }
    }

    pub fn span(&self) -> chrono::TimeDelta {
        self.last_tap - self.first_tap
    }

    pub(crate) fn recompute_hours(&mut self) {
        self.hours_present = self.span().num_microseconds().unwrap_or(0) as f64 / 3_600_000_000.0;
    }
}
