//! Day attribution: which attendance day a tap belongs to, and which days count as working days.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone, Weekday};
use chrono_tz::Tz;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct DayRules {
    tz: Tz,
    day_start_hour: u32,
    holidays: BTreeSet<NaiveDate>,
}

impl DayRules {
    pub fn new(tz: Tz, day_start_hour: u32, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            tz,
            day_start_hour,
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    fn day_shift(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.day_start_hour))
    }

    /// The instant expressed in the configured zone, kept as a fixed offset.
    pub fn to_local<Z: TimeZone>(&self, ts: &DateTime<Z>) -> DateTime<FixedOffset> {
        ts.with_timezone(&self.tz).fixed_offset()
    }

    /// Attendance day of an instant: the day runs from `day_start_hour` to
    /// just before `day_start_hour` the next calendar day.
    pub fn effective_date<Z: TimeZone>(&self, ts: &DateTime<Z>) -> NaiveDate {
        (ts.with_timezone(&self.tz) - self.day_shift()).date_naive()
    }

    /// Local time of day shifted by the day start, so 02:00 sorts after 23:00.
    pub fn shifted_time(&self, ts: &DateTime<FixedOffset>) -> NaiveTime {
        (self.to_local(ts) - self.day_shift()).time()
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    /// Working days in `[from, to)`.
    pub fn working_days_between(&self, from: NaiveDate, to: NaiveDate) -> usize {
        from.iter_days()
            .take_while(|d| *d < to)
            .filter(|d| self.is_working_day(*d))
            .count()
    }
}
