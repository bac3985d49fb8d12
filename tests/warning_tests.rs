//! Warning scheduler properties: fixed leads, escalation, dedup, and
//! suppression of "approaching" chatter for limits already violated.

use chrono::{NaiveDate, NaiveDateTime};
use rhoslogger::core::hos::limits::CycleRule;
use rhoslogger::core::hos::next_warnings;
use rhoslogger::models::duty_status::DutyStatus;
use rhoslogger::models::snapshot::{ComplianceSnapshot, Violation};
use rhoslogger::models::warning::Severity;
use std::collections::HashSet;

fn as_of() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn snapshot() -> ComplianceSnapshot {
    ComplianceSnapshot {
        driver: "D001".to_string(),
        as_of: as_of(),
        current_status: DutyStatus::Driving,
        cycle: CycleRule::SeventyHour8Day,
        drive_since_rest_secs: 0,
        duty_window_secs: 0,
        cycle_drive_secs: 0,
        drive_7d_secs: 0,
        drive_8d_secs: 0,
        drive_since_break_secs: 0,
        last_rest_end: None,
        last_restart_end: None,
        violations: Vec::new(),
    }
}

#[test]
fn no_duplicate_limit_severity_pairs() {
    let mut s = snapshot();
    s.drive_since_rest_secs = 10 * 3600;
    s.duty_window_secs = 13 * 3600;
    s.drive_since_break_secs = 7 * 3600;
    s.cycle_drive_secs = 69 * 3600;

    let warnings = next_warnings(&s);

    let mut seen = HashSet::new();
    for w in &warnings {
        assert!(
            seen.insert((w.limit, w.severity)),
            "duplicate pair {:?}/{:?}",
            w.limit,
            w.severity
        );
    }
}

#[test]
fn violated_limit_produces_no_approaching_warnings() {
    let mut s = snapshot();
    s.drive_since_rest_secs = 11 * 3600;
    s.violations.push(Violation::DriveLimitExceeded);
    s.duty_window_secs = 13 * 3600;

    let warnings = next_warnings(&s);

    assert!(
        warnings
            .iter()
            .all(|w| w.limit != Violation::DriveLimitExceeded)
    );
    assert!(
        warnings
            .iter()
            .any(|w| w.limit == Violation::DutyWindowExceeded)
    );
}

#[test]
fn all_four_stages_when_an_hour_or_more_remains() {
    let mut s = snapshot();
    // exactly one hour of driving left
    s.drive_since_rest_secs = 10 * 3600;

    let warnings = next_warnings(&s);
    let drive: Vec<_> = warnings
        .iter()
        .filter(|w| w.limit == Violation::DriveLimitExceeded)
        .collect();

    assert_eq!(drive.len(), 4);

    // the 60-minute notice is due right now
    let notice = drive.iter().find(|w| w.severity == Severity::Notice).unwrap();
    assert_eq!(notice.due, as_of());

    // the critical stage is due 55 minutes out
    let critical = drive
        .iter()
        .find(|w| w.severity == Severity::Critical)
        .unwrap();
    assert_eq!(critical.due, as_of() + chrono::Duration::minutes(55));
}

#[test]
fn passed_stages_are_skipped() {
    let mut s = snapshot();
    // 20 minutes of driving left: the 60- and 30-minute stages are gone
    s.drive_since_rest_secs = 10 * 3600 + 40 * 60;

    let warnings = next_warnings(&s);
    let drive: Vec<_> = warnings
        .iter()
        .filter(|w| w.limit == Violation::DriveLimitExceeded)
        .collect();

    assert_eq!(drive.len(), 2);
    assert!(drive.iter().all(|w| w.lead_secs <= 20 * 60));
}

#[test]
fn warnings_are_ordered_by_due_time() {
    let mut s = snapshot();
    s.drive_since_rest_secs = 10 * 3600 + 30 * 60; // 30 min left
    s.duty_window_secs = 12 * 3600; // 2h left

    let warnings = next_warnings(&s);
    for pair in warnings.windows(2) {
        assert!(pair[0].due <= pair[1].due);
    }
}

#[test]
fn scheduler_is_stateless_and_restartable() {
    let mut s = snapshot();
    s.drive_since_rest_secs = 9 * 3600;

    let first = next_warnings(&s);
    let second = next_warnings(&s);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.limit, b.limit);
        assert_eq!(a.severity, b.severity);
        assert_eq!(a.due, b.due);
    }
}
