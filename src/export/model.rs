// src/export/model.rs

use crate::models::record::DutyRecord;
use serde::Serialize;

/// Flat row for record exports.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub id: i64,
    pub driver: String,
    pub status: String,
    pub start: String,
    pub end: String,
    pub lat: f64,
    pub lon: f64,
    pub source: String,
    pub corrects: Option<i64>,
}

impl RecordExport {
    pub fn from_record(rec: &DutyRecord) -> Self {
        Self {
            id: rec.id,
            driver: rec.driver.clone(),
            status: rec.status.to_db_str().to_string(),
            start: rec.start_str(),
            end: rec.end_str().unwrap_or_default(),
            lat: rec.location.lat,
            lon: rec.location.lon,
            source: rec.source.to_db_str().to_string(),
            corrects: rec.corrects,
        }
    }
}
