//! Formatting utilities used for terminal and export outputs.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// "8 hours and 5 minutes", or "12 minutes and 40 seconds" below one hour.
pub fn format_span(span: TimeDelta) -> String {
    let hours = span.num_hours();
    if hours >= 1 {
        format!("{} hours and {} minutes", hours, span.num_minutes() % 60)
    } else {
        format!(
            "{} minutes and {} seconds",
            span.num_minutes() % 60,
            span.num_seconds() % 60
        )
    }
}

/// One flame per streak day.
pub fn flames(streak: u32) -> String {
    "🔥".repeat(streak as usize)
}

pub fn day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

pub fn clock_time(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_switch_units_at_one_hour() {
        assert_eq!(
            format_span(TimeDelta::minutes(8 * 60 + 5)),
            "8 hours and 5 minutes"
        );
        assert_eq!(
            format_span(TimeDelta::seconds(12 * 60 + 40)),
            "12 minutes and 40 seconds"
        );
        assert_eq!(format_span(TimeDelta::zero()), "0 minutes and 0 seconds");
    }

    #[test]
    fn flames_repeat_per_day() {
        assert_eq!(flames(3), "🔥🔥🔥");
        assert_eq!(flames(0), "");
    }
}
