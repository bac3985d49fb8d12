//! Qualifying-rest and 34-hour-restart detection over a span sequence.

use crate::core::history::DutySpan;
use crate::core::hos::limits::{
    QUALIFYING_REST_SECS, RESTART_NIGHT_WINDOWS, RESTART_SECS,
};
use chrono::{Duration, NaiveDateTime, NaiveTime};

/// A coalesced run of consecutive OffDuty/SleeperBerth spans.
#[derive(Debug, Clone, Copy)]
pub struct RestPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl RestPeriod {
    pub fn seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// Coalesce adjacent rest spans into continuous rest periods.
/// Spans are contiguous in a well-formed log, so two rest spans touching
/// end-to-start belong to the same period.
pub fn rest_periods(spans: &[DutySpan]) -> Vec<RestPeriod> {
    let mut out: Vec<RestPeriod> = Vec::new();

    for span in spans.iter().filter(|s| s.status.is_rest()) {
        if let Some(last) = out.last_mut()
            && last.end == span.start
        {
            last.end = span.end;
            continue;
        }
        out.push(RestPeriod {
            start: span.start,
            end: span.end,
        });
    }

    out
}

/// End of the most recent rest period of at least 10 consecutive hours.
/// An ongoing rest that already qualifies counts with its clipped end,
/// so the since-rest clocks read zero while the driver is still resting.
pub fn last_qualifying_rest_end(rests: &[RestPeriod]) -> Option<NaiveDateTime> {
    rests
        .iter()
        .filter(|r| r.seconds() >= QUALIFYING_REST_SECS)
        .map(|r| r.end)
        .last()
}

/// End of the most recent valid 34-hour restart: a continuous rest of at
/// least 34 hours that fully contains two 1:00-5:00 local-time windows.
pub fn last_restart_end(rests: &[RestPeriod]) -> Option<NaiveDateTime> {
    rests
        .iter()
        .filter(|r| r.seconds() >= RESTART_SECS && night_windows_within(r) >= RESTART_NIGHT_WINDOWS)
        .map(|r| r.end)
        .last()
}

/// Count calendar days whose full [01:00, 05:00] window lies inside the
/// rest period.
fn night_windows_within(rest: &RestPeriod) -> usize {
    let one_am = NaiveTime::from_hms_opt(1, 0, 0).unwrap();
    let five_am = NaiveTime::from_hms_opt(5, 0, 0).unwrap();

    let mut count = 0;
    let mut day = rest.start.date();
    let last_day = rest.end.date();

    while day <= last_day {
        let win_start = day.and_time(one_am);
        let win_end = day.and_time(five_am);
        if win_start >= rest.start && win_end <= rest.end {
            count += 1;
        }
        day = day + Duration::days(1);
    }

    count
}
