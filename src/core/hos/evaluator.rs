//! Rolling-window evaluation. Everything here is a pure function of the
//! record sequence up to `as_of`: same log in, same snapshot out.

use crate::core::history::{self, DutySpan};
use crate::core::hos::limits::{
    BREAK_SECS, BREAK_TRIGGER_SECS, CycleRule, DRIVE_LIMIT_SECS, DUTY_WINDOW_SECS,
};
use crate::core::hos::rest;
use crate::models::record::DutyRecord;
use crate::models::snapshot::{ComplianceSnapshot, Violation};
use chrono::{Duration, NaiveDateTime};

pub fn evaluate(
    driver: &str,
    records: &[DutyRecord],
    as_of: NaiveDateTime,
    cycle: CycleRule,
) -> ComplianceSnapshot {
    let resolved = history::resolve_corrections(records);
    let spans = history::spans_up_to(&resolved, as_of);
    let current_status = history::status_at(&resolved, as_of);

    let rests = rest::rest_periods(&spans);
    let last_rest_end = rest::last_qualifying_rest_end(&rests);
    let last_restart_end = rest::last_restart_end(&rests);

    // The 11h and 14h clocks anchor at the first on-duty activity after
    // the last qualifying rest. No on-duty activity → neither has started.
    let anchor = duty_anchor(&spans, last_rest_end);

    let (drive_since_rest_secs, duty_window_secs) = match anchor {
        Some(a) => (
            driving_secs(&spans, a, as_of),
            (as_of - a).num_seconds(),
        ),
        None => (0, 0),
    };

    // Cycle accumulation: trailing window, further truncated at the end
    // of the latest valid 34-hour restart.
    let drive_8d_secs =
        cycle_driving_secs(&spans, as_of, CycleRule::SeventyHour8Day, last_restart_end);
    let drive_7d_secs =
        cycle_driving_secs(&spans, as_of, CycleRule::SixtyHour7Day, last_restart_end);
    let cycle_drive_secs = match cycle {
        CycleRule::SeventyHour8Day => drive_8d_secs,
        CycleRule::SixtyHour7Day => drive_7d_secs,
    };

    let drive_since_break_secs = driving_since_last_break(&spans, as_of);

    // All simultaneously exceeded limits are reported; callers pick what
    // to act on first.
    let mut violations = Vec::new();
    if drive_since_rest_secs >= DRIVE_LIMIT_SECS {
        violations.push(Violation::DriveLimitExceeded);
    }
    if duty_window_secs >= DUTY_WINDOW_SECS {
        violations.push(Violation::DutyWindowExceeded);
    }
    if cycle_drive_secs >= cycle.limit_secs() {
        violations.push(Violation::CycleLimitExceeded);
    }
    if drive_since_break_secs >= BREAK_TRIGGER_SECS {
        violations.push(Violation::BreakRequired);
    }

    ComplianceSnapshot {
        driver: driver.to_string(),
        as_of,
        current_status,
        cycle,
        drive_since_rest_secs,
        duty_window_secs,
        cycle_drive_secs,
        drive_7d_secs,
        drive_8d_secs,
        drive_since_break_secs,
        last_rest_end,
        last_restart_end,
        violations,
    }
}

/// Start of the first on-duty span at or after the last qualifying rest
/// (or the first on-duty span ever, when no rest qualifies).
fn duty_anchor(spans: &[DutySpan], rest_end: Option<NaiveDateTime>) -> Option<NaiveDateTime> {
    spans
        .iter()
        .filter(|s| s.status.is_on_duty())
        .filter(|s| match rest_end {
            Some(re) => s.start >= re,
            None => true,
        })
        .map(|s| s.start)
        .next()
}

fn driving_secs(spans: &[DutySpan], from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    spans
        .iter()
        .filter(|s| s.status.is_driving())
        .map(|s| s.overlap_secs(from, to))
        .sum()
}

fn cycle_driving_secs(
    spans: &[DutySpan],
    as_of: NaiveDateTime,
    rule: CycleRule,
    restart_end: Option<NaiveDateTime>,
) -> i64 {
    let mut from = as_of - Duration::days(rule.window_days());
    if let Some(re) = restart_end
        && re > from
    {
        from = re;
    }
    driving_secs(spans, from, as_of)
}

/// Driving accumulated since the end of the last interruption of driving
/// of at least 30 consecutive minutes (any non-driving status counts).
fn driving_since_last_break(spans: &[DutySpan], as_of: NaiveDateTime) -> i64 {
    let mut break_end: Option<NaiveDateTime> = None;

    // Coalesce consecutive non-driving spans; the log is contiguous, so
    // touching spans form one interruption.
    let mut run: Option<(NaiveDateTime, NaiveDateTime)> = None;
    for span in spans {
        if span.status.is_driving() {
            run = None;
            continue;
        }
        match run {
            Some((start, end)) if end == span.start => run = Some((start, span.end)),
            _ => run = Some((span.start, span.end)),
        }
        if let Some((start, end)) = run
            && (end - start).num_seconds() >= BREAK_SECS
        {
            break_end = Some(end);
        }
    }

    let from = break_end
        .or_else(|| spans.first().map(|s| s.start))
        .unwrap_or(as_of);

    driving_secs(spans, from, as_of)
}
