/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Color for a remaining-time figure:
/// over the limit → red, under an hour left → yellow, otherwise green.
pub fn color_for_remaining(remaining_secs: i64) -> &'static str {
    if remaining_secs <= 0 {
        RED
    } else if remaining_secs <= 3600 {
        YELLOW
    } else {
        GREEN
    }
}

/// Duty statuses get a stable color each in listings.
pub fn color_for_status(code: &str) -> &'static str {
    match code {
        "D" => GREEN,
        "ON" => YELLOW,
        "SB" => CYAN,
        "OFF" => GREY,
        _ => RESET,
    }
}
