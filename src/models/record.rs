use super::{duty_status::DutyStatus, geo::GeoPoint, source::RecordSource};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

pub const TS_FMT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct DutyRecord {
    pub id: i64,
    pub driver: String,         // ⇔ records.driver
    pub status: DutyStatus,     // ⇔ records.status ('OFF'|'SB'|'D'|'ON')
    pub start: NaiveDateTime,   // ⇔ records.start_ts (TEXT "YYYY-MM-DD HH:MM:SS")
    pub end: Option<NaiveDateTime>, // ⇔ records.end_ts, NULL while open
    pub location: GeoPoint,     // ⇔ records.lat / records.lon
    pub source: RecordSource,   // ⇔ records.source ('auto'|'manual')

    pub corrects: Option<i64>,  // ⇔ records.corrects (id of superseded record)
    pub created_at: String,     // ⇔ records.created_at (TEXT, ISO8601)
}

impl DutyRecord {
    /// High-level constructor for records created by the tracker.
    /// - `id = 0` until inserted
    /// - `corrects = None` (set only by the correction workflow)
    /// - `created_at = now() in ISO8601`
    pub fn open(
        driver: &str,
        status: DutyStatus,
        start: NaiveDateTime,
        location: GeoPoint,
        source: RecordSource,
    ) -> Self {
        Self {
            id: 0,
            driver: driver.to_string(),
            status,
            start,
            end: None,
            location,
            source,
            corrects: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    pub fn start_str(&self) -> String {
        self.start.format(TS_FMT).to_string()
    }

    pub fn end_str(&self) -> Option<String> {
        self.end.map(|e| e.format(TS_FMT).to_string())
    }
}
