use super::duty_status::DutyStatus;
use crate::core::hos::limits::{self, CycleRule};
use chrono::NaiveDateTime;
use serde::Serialize;

/// The four regulatory limits. Exceeding one is a domain finding, not a
/// fault: it is reported inside the snapshot, never returned as an error.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Violation {
    DriveLimitExceeded,
    DutyWindowExceeded,
    CycleLimitExceeded,
    BreakRequired,
}

impl Violation {
    pub fn code(&self) -> &'static str {
        match self {
            Violation::DriveLimitExceeded => "DriveLimitExceeded",
            Violation::DutyWindowExceeded => "DutyWindowExceeded",
            Violation::CycleLimitExceeded => "CycleLimitExceeded",
            Violation::BreakRequired => "BreakRequired",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Violation::DriveLimitExceeded => "11-hour driving limit",
            Violation::DutyWindowExceeded => "14-hour duty window",
            Violation::CycleLimitExceeded => "cycle driving limit",
            Violation::BreakRequired => "30-minute break required",
        }
    }
}

/// Result of evaluating a driver's record sequence up to `as_of`.
/// All accumulators are seconds; all are recomputed from the log on
/// every call.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceSnapshot {
    pub driver: String,
    pub as_of: NaiveDateTime,
    pub current_status: DutyStatus,
    pub cycle: CycleRule,

    pub drive_since_rest_secs: i64,
    pub duty_window_secs: i64,
    pub cycle_drive_secs: i64,
    pub drive_7d_secs: i64,
    pub drive_8d_secs: i64,
    pub drive_since_break_secs: i64,

    pub last_rest_end: Option<NaiveDateTime>,
    pub last_restart_end: Option<NaiveDateTime>,

    pub violations: Vec<Violation>,
}

impl ComplianceSnapshot {
    pub fn is_violated(&self, v: Violation) -> bool {
        self.violations.contains(&v)
    }

    /// Seconds left before the given limit trips, clamped at zero.
    pub fn remaining_secs(&self, v: Violation) -> i64 {
        let (used, limit) = match v {
            Violation::DriveLimitExceeded => (self.drive_since_rest_secs, limits::DRIVE_LIMIT_SECS),
            Violation::DutyWindowExceeded => (self.duty_window_secs, limits::DUTY_WINDOW_SECS),
            Violation::CycleLimitExceeded => (self.cycle_drive_secs, self.cycle.limit_secs()),
            Violation::BreakRequired => (self.drive_since_break_secs, limits::BREAK_TRIGGER_SECS),
        };
        (limit - used).max(0)
    }
}
