//! Approaching-limit warnings. Stateless: recomputed fresh from the
//! snapshot on every call, so the schedule survives restarts for free.

use crate::core::hos::limits::WARNING_LEADS_MIN;
use crate::models::snapshot::{ComplianceSnapshot, Violation};
use crate::models::warning::{Severity, Warning};
use chrono::Duration;

const LIMITS: [Violation; 4] = [
    Violation::DriveLimitExceeded,
    Violation::DutyWindowExceeded,
    Violation::CycleLimitExceeded,
    Violation::BreakRequired,
];

fn severity_for_lead(lead_min: i64) -> Severity {
    match lead_min {
        60 => Severity::Notice,
        30 => Severity::Caution,
        15 => Severity::Urgent,
        _ => Severity::Critical,
    }
}

/// Upcoming warnings for every limit not yet violated, ordered by
/// projected fire time. A limit already exceeded contributes nothing:
/// the violation itself is in the snapshot, and "approaching" chatter on
/// top of it would be noise. Each (limit, severity) pair appears at most
/// once.
pub fn next_warnings(snapshot: &ComplianceSnapshot) -> Vec<Warning> {
    let mut out = Vec::new();

    for limit in LIMITS {
        if snapshot.is_violated(limit) {
            continue;
        }

        let remaining = snapshot.remaining_secs(limit);

        for lead_min in WARNING_LEADS_MIN {
            let lead_secs = lead_min * 60;
            if lead_secs > remaining {
                // this stage has already passed
                continue;
            }

            out.push(Warning {
                limit,
                lead_secs,
                severity: severity_for_lead(lead_min),
                due: snapshot.as_of + Duration::seconds(remaining - lead_secs),
            });
        }
    }

    out.sort_by(|a, b| a.due.cmp(&b.due).then(a.lead_secs.cmp(&b.lead_secs)));
    out
}
