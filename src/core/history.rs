//! Resolved view over a driver's raw record sequence: corrections are
//! applied, records are clipped at the evaluation instant, and the
//! result is a list of closed spans the evaluator can accumulate over.

use crate::models::duty_status::DutyStatus;
use crate::models::record::DutyRecord;
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// A closed slice of a driver's timeline. Open records are clipped at
/// the evaluation instant before becoming spans.
#[derive(Debug, Clone, Copy)]
pub struct DutySpan {
    pub status: DutyStatus,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DutySpan {
    /// Seconds of overlap with [from, to].
    pub fn overlap_secs(&self, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
        let s = self.start.max(from);
        let e = self.end.min(to);
        if e > s { (e - s).num_seconds() } else { 0 }
    }
}

/// Drop superseded records and re-sort the survivors by timestamp.
/// A correction record replaces the record its `corrects` field points
/// at; chains resolve naturally because every superseded id drops out.
pub fn resolve_corrections(records: &[DutyRecord]) -> Vec<DutyRecord> {
    let superseded: HashSet<i64> = records.iter().filter_map(|r| r.corrects).collect();

    let mut active: Vec<DutyRecord> = records
        .iter()
        .filter(|r| !superseded.contains(&r.id))
        .cloned()
        .collect();

    active.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
    active
}

/// Clip resolved records into closed spans up to `as_of`.
/// Records starting at or after `as_of` are discarded; the open record
/// (and any record still running at `as_of`) ends there.
pub fn spans_up_to(records: &[DutyRecord], as_of: NaiveDateTime) -> Vec<DutySpan> {
    records
        .iter()
        .filter(|r| r.start < as_of)
        .map(|r| DutySpan {
            status: r.status,
            start: r.start,
            end: match r.end {
                Some(e) if e < as_of => e,
                _ => as_of,
            },
        })
        .collect()
}

/// The status in force at `as_of`: the last span starting at or before
/// the instant. A driver with no history is off duty.
pub fn status_at(records: &[DutyRecord], as_of: NaiveDateTime) -> DutyStatus {
    records
        .iter()
        .filter(|r| r.start <= as_of)
        .last()
        .map(|r| r.status)
        .unwrap_or(DutyStatus::OffDuty)
}
