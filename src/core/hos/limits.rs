//! Regulatory thresholds. All comparisons elsewhere are `>=` against
//! these values, at second resolution.

use crate::errors::{AppError, AppResult};
use serde::Serialize;

/// 11 hours of driving since the last qualifying rest.
pub const DRIVE_LIMIT_SECS: i64 = 11 * 3600;

/// 14-hour duty window since coming on duty after a qualifying rest.
pub const DUTY_WINDOW_SECS: i64 = 14 * 3600;

/// A rest period qualifies when it spans at least 10 consecutive hours.
pub const QUALIFYING_REST_SECS: i64 = 10 * 3600;

/// A restart is a continuous rest of at least 34 hours.
pub const RESTART_SECS: i64 = 34 * 3600;

/// Number of full 1:00-5:00 local-time windows a restart must contain.
pub const RESTART_NIGHT_WINDOWS: usize = 2;

/// 8 cumulative driving hours trigger the 30-minute break requirement.
pub const BREAK_TRIGGER_SECS: i64 = 8 * 3600;

/// An interruption of driving counts as a break from 30 minutes up.
pub const BREAK_SECS: i64 = 30 * 60;

/// Warning lead offsets, minutes before each threshold.
pub const WARNING_LEADS_MIN: [i64; 4] = [60, 30, 15, 5];

/// Which cumulative cycle the carrier operates under.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum CycleRule {
    /// 70 hours in any 8 consecutive days.
    SeventyHour8Day,
    /// 60 hours in any 7 consecutive days.
    SixtyHour7Day,
}

impl CycleRule {
    pub fn limit_secs(&self) -> i64 {
        match self {
            CycleRule::SeventyHour8Day => 70 * 3600,
            CycleRule::SixtyHour7Day => 60 * 3600,
        }
    }

    pub fn window_days(&self) -> i64 {
        match self {
            CycleRule::SeventyHour8Day => 8,
            CycleRule::SixtyHour7Day => 7,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CycleRule::SeventyHour8Day => "70/8",
            CycleRule::SixtyHour7Day => "60/7",
        }
    }

    pub fn from_code(code: &str) -> AppResult<Self> {
        match code.trim() {
            "70/8" => Ok(CycleRule::SeventyHour8Day),
            "60/7" => Ok(CycleRule::SixtyHour7Day),
            other => Err(AppError::InvalidCycle(other.to_string())),
        }
    }
}
