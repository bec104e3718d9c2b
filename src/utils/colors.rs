/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Clear the terminal and move the cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn green(value: &str) -> String {
    format!("{GREEN}{value}{RESET}")
}

pub fn yellow(value: &str) -> String {
    format!("{YELLOW}{value}{RESET}")
}
