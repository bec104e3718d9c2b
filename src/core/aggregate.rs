//! Folding taps into per-day attendance records.

use crate::core::calendar::DayRules;
use crate::errors::{AppError, AppResult};
use crate::models::record::AttendanceRecord;
use chrono::{DateTime, FixedOffset};

/// What a tap did to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// A record was opened for a new effective day.
    Opened,
    /// The record of the current effective day was extended.
    Amended,
}

/// Apply one tap to an identity's ordered history.
///
/// Only the last record is ever touched; earlier records are left as they are.
/// A tap whose effective day precedes the last record is rejected and the
/// history is not modified.
pub fn apply_tap(
    history: &mut Vec<AttendanceRecord>,
    tap: &DateTime<FixedOffset>,
    rules: &DayRules,
) -> AppResult<TapOutcome> {
    let local = rules.to_local(tap);
    let date = rules.effective_date(tap);

    let Some(last) = history.last_mut() else {
        history.push(AttendanceRecord::opened(date, local, 1));
        return Ok(TapOutcome::Opened);
    };

    if last.effective_date == date {
        if local < last.first_tap {
            last.first_tap = local;
        }
        if local > last.last_tap {
            last.last_tap = local;
        }
        last.recompute_hours();
        return Ok(TapOutcome::Amended);
    }

    if date < last.effective_date {
        return Err(AppError::OutOfOrderTap {
            tap: date.to_string(),
            last: last.effective_date.to_string(),
        });
    }

    let streak = if rules.working_days_between(last.effective_date, date) <= 1 {
        last.current_streak + 1
    } else {
        1
    };

    history.push(AttendanceRecord::opened(date, local, streak));
    Ok(TapOutcome::Opened)
}
