use chrono::{Datelike, NaiveDate, TimeDelta};

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_starts_on_monday() {
        let wed = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let sun = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mon = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(week_start(wed), mon);
        assert_eq!(week_start(sun), mon);
        assert_eq!(week_start(mon), mon);
    }
}
