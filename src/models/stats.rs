use super::record::AttendanceRecord;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};

/// Read-only aggregates computed from one identity's history.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub current_streak: u32,
    pub total_days: usize,
    pub days_last_7: usize,
    pub days_last_30: usize,
    pub today: DayView,
    pub longest_day: DayView,
    pub earliest_arrival: DayView,
    pub latest_departure: DayView,
}

/// The parts of a record the views print.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    pub first_tap: DateTime<FixedOffset>,
    pub last_tap: DateTime<FixedOffset>,
    pub hours: f64,
}

impl DayView {
    pub fn span(&self) -> TimeDelta {
        self.last_tap - self.first_tap
    }
}

impl From<&AttendanceRecord> for DayView {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            date: r.effective_date,
            first_tap: r.first_tap,
            last_tap: r.last_tap,
            hours: r.hours_present,
        }
    }
}
