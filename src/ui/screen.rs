//! Text shown by the terminal session.

use crate::core::summary::daily_hours;
use crate::models::identifier::Identifier;
use crate::models::identity::Identity;
use crate::models::record::AttendanceRecord;
use crate::models::stats::{DayView, StatsReport};
use crate::utils::colors::{CYAN, GREY, RESET, green, yellow};
use crate::utils::date::week_start;
use crate::utils::formatting::{bold, clock_time, day_month, flames, format_span};
use ansi_term::Colour;
use chrono::{Datelike, NaiveDate, TimeDelta};

pub const GREETING: &str = "\
Welcome to the study hall <3
Tap your card on the reader to register arrival or departure.
";

pub const PROMPT: &str = "\
enter     : reset screen
i + enter : show instructions
s + enter : show statistics
u + enter : set a new username
q + enter : quit
> ";

pub const INSTRUCTIONS: &str = "\
INSTRUCTIONS:

Tap your card on the reader to register arrival or departure.
Only the first and the last tap of the day* count for the statistics,
they are read as arrival and departure.
Taps in between change nothing, so tapping once too often is safe.

A streak counts the days in a row you have been here. Weekends do not
break it: Friday followed by Monday keeps the streak going.

NB: THE CARD CARRIES TWO NUMBERS. CHECK THAT YOU ARE REGISTERED CORRECTLY.
Give both numbers the same username and their statistics are combined.

*The day starts at 05:00 and ends at 04:59 the next day.
";

pub const MUST_IDENTIFY: &str = "You must tap your card first!\n";

pub fn no_data(identity: &Identity) -> String {
    format!(
        "No attendance recorded yet for {}.\n",
        yellow(&identity.display_name)
    )
}

pub fn username_prompt(identity: &Identity) -> String {
    format!(
        "Enter a username for card number {}: ",
        identity.identifier
    )
}

pub fn username_saved(identity: &Identity) -> String {
    format!(
        "Username {} registered for card {}\n",
        green(&identity.display_name),
        identity.identifier
    )
}

pub const USERNAME_UNCHANGED: &str = "Empty username, nothing changed.\n";

/// Response to a tap: greeting, streak flames and today's presence.
pub fn welcome(identity: &Identity, today: &AttendanceRecord) -> String {
    let mut out = if identity.has_default_name() {
        format!(
            "Card number {} registered! Set a username with 'u'.\n",
            green(identity.identifier.as_str())
        )
    } else {
        format!("Welcome {}!\n", green(&identity.display_name))
    };

    out.push_str(&flames(today.current_streak));
    out.push('\n');
    out.push_str(&format!(
        "Today you have been here since {}, that makes {}\n",
        yellow(&clock_time(&today.first_tap)),
        green(&format_span(today.span()))
    ));
    out
}

fn day_line(label: &str, day: &DayView) -> String {
    format!(
        "{}{}{} {}: {} to {}, {}\n",
        CYAN,
        label,
        RESET,
        yellow(&day_month(day.date)),
        clock_time(&day.first_tap),
        clock_time(&day.last_tap),
        green(&format_span(day.span()))
    )
}

/// Full statistics view for one identity.
pub fn stats(identity: &Identity, report: &StatsReport) -> String {
    let mut out = String::new();
    out.push_str(&bold(&format!("Statistics for {}", identity.display_name)));
    out.push('\n');
    out.push_str(&format!(
        "{} streak: {} days\n",
        flames(report.current_streak),
        report.current_streak
    ));
    out.push_str(&format!(
        "Days present: {} in total, {} in the last 7 days, {} in the last 30 days\n",
        report.total_days, report.days_last_7, report.days_last_30
    ));
    out.push_str(&day_line("Longest day:", &report.longest_day));
    out.push_str(&format!(
        "{}Earliest arrival:{} {} on {}\n",
        CYAN,
        RESET,
        yellow(&clock_time(&report.earliest_arrival.first_tap)),
        day_month(report.earliest_arrival.date)
    ));
    out.push_str(&format!(
        "{}Latest departure:{} {} on {}\n",
        CYAN,
        RESET,
        yellow(&clock_time(&report.latest_departure.last_tap)),
        day_month(report.latest_departure.date)
    ));
    out
}

/// Footer for statistics read across several cards.
pub fn linked_cards(cards: &[Identifier]) -> String {
    let list: Vec<&str> = cards.iter().map(Identifier::as_str).collect();
    format!("{}Combined cards: {}{}\n", GREY, list.join(", "), RESET)
}

const LEGEND: [(Option<f64>, &str); 8] = [
    (None, "no attendance"),
    (Some(0.0), "under an hour / single tap"),
    (Some(1.0), "one to two hours"),
    (Some(2.0), "two to four hours"),
    (Some(4.0), "four to eight hours"),
    (Some(8.0), "eight to ten hours"),
    (Some(10.0), "ten to twelve hours"),
    (Some(12.0), "over twelve hours"),
];

fn hours_colour(hours: Option<f64>) -> Colour {
    match hours {
        None => Colour::Fixed(238),
        Some(h) if h < 1.0 => Colour::RGB(120, 170, 255),
        Some(h) if h < 2.0 => Colour::RGB(0, 240, 0),
        Some(h) if h < 4.0 => Colour::RGB(0, 180, 0),
        Some(h) if h < 8.0 => Colour::RGB(0, 120, 0),
        Some(h) if h < 10.0 => Colour::RGB(0, 60, 0),
        Some(h) if h < 12.0 => Colour::RGB(180, 0, 0),
        Some(_) => Colour::RGB(60, 0, 0),
    }
}

/// Week-by-week grid of hours present, oldest week on the left, ending with
/// the week that contains `today`.
pub fn heatmap(history: &[AttendanceRecord], today: NaiveDate, weeks: u32) -> String {
    let weeks = weeks.max(1);
    let from = week_start(today) - TimeDelta::weeks(i64::from(weeks - 1));
    let series = daily_hours(history, from, today);

    let mut rows: [String; 7] = Default::default();
    for (date, hours) in &series {
        let row = &mut rows[date.weekday().num_days_from_monday() as usize];
        row.push_str(&hours_colour(*hours).paint("██").to_string());
        row.push(' ');
    }

    let mut out = format!("Hours per day, last {} weeks\n", weeks);
    for (label, row) in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        .iter()
        .zip(rows.iter())
    {
        out.push_str(&format!("{GREY}{label}{RESET} {row}\n"));
    }
    out.push('\n');
    for (hours, text) in LEGEND {
        out.push_str(&format!("{} {}\n", hours_colour(hours).paint("██"), text));
    }
    out
}
