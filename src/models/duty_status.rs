use serde::Serialize;

/// The four regulatory duty statuses. A driver is always in exactly one.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDutyNotDriving,
}

impl DutyStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "OFF",
            DutyStatus::SleeperBerth => "SB",
            DutyStatus::Driving => "D",
            DutyStatus::OnDutyNotDriving => "ON",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "OFF" => Some(DutyStatus::OffDuty),
            "SB" => Some(DutyStatus::SleeperBerth),
            "D" => Some(DutyStatus::Driving),
            "ON" => Some(DutyStatus::OnDutyNotDriving),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase).
    /// Accepts both the short DB codes and a few spelled-out aliases.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "OFF" | "OFFDUTY" | "OFF-DUTY" => Some(DutyStatus::OffDuty),
            "SB" | "SLEEPER" => Some(DutyStatus::SleeperBerth),
            "D" | "DRIVING" => Some(DutyStatus::Driving),
            "ON" | "ONDUTY" | "ON-DUTY" => Some(DutyStatus::OnDutyNotDriving),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off duty",
            DutyStatus::SleeperBerth => "Sleeper berth",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDutyNotDriving => "On duty (not driving)",
        }
    }

    pub fn is_driving(&self) -> bool {
        matches!(self, DutyStatus::Driving)
    }

    /// OffDuty and SleeperBerth both count toward qualifying rest.
    pub fn is_rest(&self) -> bool {
        matches!(self, DutyStatus::OffDuty | DutyStatus::SleeperBerth)
    }

    pub fn is_on_duty(&self) -> bool {
        !self.is_rest()
    }
}
