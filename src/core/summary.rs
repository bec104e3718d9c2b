//! Aggregates over a stored attendance history.

use crate::core::aggregate::apply_tap;
use crate::core::calendar::DayRules;
use crate::errors::AppResult;
use crate::models::record::AttendanceRecord;
use crate::models::stats::StatsReport;
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::HashMap;

/// Summarize a history. Returns `None` for an empty history.
pub fn summarize(history: &[AttendanceRecord], rules: &DayRules) -> Option<StatsReport> {
    let last = history.last()?;

    let days_within = |window: i64| {
        history
            .iter()
            .filter(|r| (last.effective_date - r.effective_date).num_days() < window)
            .count()
    };

    let mut longest = &history[0];
    let mut earliest = &history[0];
    let mut latest = &history[0];
    for r in &history[1..] {
        if r.hours_present > longest.hours_present {
            longest = r;
        }
        if rules.shifted_time(&r.first_tap) < rules.shifted_time(&earliest.first_tap) {
            earliest = r;
        }
        if rules.shifted_time(&r.last_tap) > rules.shifted_time(&latest.last_tap) {
            latest = r;
        }
    }

    Some(StatsReport {
        current_streak: last.current_streak,
        total_days: history.len(),
        days_last_7: days_within(7),
        days_last_30: days_within(30),
        today: last.into(),
        longest_day: longest.into(),
        earliest_arrival: earliest.into(),
        latest_departure: latest.into(),
    })
}

/// One history out of several cards' histories, as if every stored arrival
/// and departure had been tapped with a single card. Days seen on more than
/// one card are joined and streaks are counted over the union.
pub fn merge_histories<'a, I>(histories: I, rules: &DayRules) -> AppResult<Vec<AttendanceRecord>>
where
    I: IntoIterator<Item = &'a [AttendanceRecord]>,
{
    let mut taps: Vec<DateTime<FixedOffset>> = histories
        .into_iter()
        .flatten()
        .flat_map(|r| [r.first_tap, r.last_tap])
        .collect();
    taps.sort();

    let mut merged = Vec::new();
    for tap in &taps {
        apply_tap(&mut merged, tap, rules)?;
    }
    Ok(merged)
}

/// Hours present per effective day over `[from, to]`, `None` for absent days.
pub fn daily_hours(
    history: &[AttendanceRecord],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<(NaiveDate, Option<f64>)> {
    let by_date: HashMap<NaiveDate, f64> = history
        .iter()
        .filter(|r| r.effective_date >= from && r.effective_date <= to)
        .map(|r| (r.effective_date, r.hours_present))
        .collect();

    from.iter_days()
        .take_while(|d| *d <= to)
        .map(|d| (d, by_date.get(&d).copied()))
        .collect()
}
