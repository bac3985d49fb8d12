//! Time utilities: parsing timestamps, duration formatting.

use crate::errors::{AppError, AppResult};
use crate::models::record::TS_FMT;
use chrono::NaiveDateTime;

/// Parse a timestamp as given on the command line.
/// Accepts "YYYY-MM-DD HH:MM:SS" and "YYYY-MM-DD HH:MM".
pub fn parse_ts(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .ok()
}

pub fn parse_optional_ts(input: Option<&String>) -> AppResult<Option<NaiveDateTime>> {
    if let Some(s) = input {
        let t = parse_ts(s).ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

pub fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds()
}

/// Format a second count as "HHh MMm" (sign preserved).
pub fn fmt_secs(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    format!("{}{:02}h {:02}m", sign, s / 3600, (s % 3600) / 60)
}

/// Short "HH:MM" rendering used in tables.
pub fn fmt_secs_short(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    format!("{}{:02}:{:02}", sign, s / 3600, (s % 3600) / 60)
}
