use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

#[derive(Debug, Clone, Copy)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => (FG_BLUE, ICON_INFO),
            Level::Success => (FG_GREEN, ICON_OK),
            Level::Warning => (FG_YELLOW, ICON_WARN),
            Level::Error => (FG_RED, ICON_ERR),
        }
    }
}

/// One status line, without trailing newline.
pub fn format_message<T: fmt::Display>(level: Level, msg: T) -> String {
    let (color, icon) = level.style();
    format!("{}{}{} {}{}", color, BOLD, icon, RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", format_message(Level::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", format_message(Level::Success, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{}", format_message(Level::Warning, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", format_message(Level::Error, msg));
}
