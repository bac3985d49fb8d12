// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::NaiveDate;

/// Parse --range (year / month / day / interval).
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - and `:`-separated ranges of any of the above
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::from(std::io::Error::other(
                "start and end must have same format",
            )));
        }

        date::range_bounds(start, end).map_err(|e| AppError::from(std::io::Error::other(e)))
    } else {
        date::period_bounds(r).map_err(|e| AppError::from(std::io::Error::other(e)))
    }
}
