use super::snapshot::Violation;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Escalating proximity levels for the fixed warning offsets.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Notice,   // 60 min out
    Caution,  // 30 min out
    Urgent,   // 15 min out
    Critical, // 5 min out
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Notice => "notice",
            Severity::Caution => "caution",
            Severity::Urgent => "urgent",
            Severity::Critical => "critical",
        }
    }
}

/// A scheduled "approaching limit" event. `due` projects when the
/// warning fires assuming the relevant clock keeps running.
#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    pub limit: Violation,
    pub lead_secs: i64,
    pub severity: Severity,
    pub due: NaiveDateTime,
}
