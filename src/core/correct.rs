use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_record, is_superseded, load_record};
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::geo::GeoPoint;
use crate::models::record::DutyRecord;
use crate::models::source::RecordSource;
use chrono::{Local, NaiveDateTime};
use rusqlite::TransactionBehavior;

/// Auditable correction workflow. History is never mutated: a correction
/// appends a superseding record pointing back at the one it replaces,
/// and every downstream evaluation resolves the link.
pub struct CorrectLogic;

impl CorrectLogic {
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        pool: &mut DbPool,
        driver: &str,
        record_id: i64,
        status: Option<DutyStatus>,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        location: Option<GeoPoint>,
        reason: Option<&str>,
    ) -> AppResult<DutyRecord> {
        let target = load_record(&pool.conn, record_id)?;

        if target.driver != driver {
            return Err(AppError::InvalidCorrection(format!(
                "record {} belongs to driver {}, not {}",
                record_id, target.driver, driver
            )));
        }

        if target.is_open() {
            return Err(AppError::InvalidCorrection(format!(
                "record {} is still open; log the next status change first",
                record_id
            )));
        }

        if is_superseded(&pool.conn, record_id)? {
            return Err(AppError::InvalidCorrection(format!(
                "record {} has already been superseded",
                record_id
            )));
        }

        let new_start = start.unwrap_or(target.start);
        let new_end = end.or(target.end);
        if let Some(e) = new_end
            && e < new_start
        {
            return Err(AppError::InvalidCorrection(format!(
                "end {} precedes start {}",
                e, new_start
            )));
        }

        let corrected = DutyRecord {
            id: 0,
            driver: driver.to_string(),
            status: status.unwrap_or(target.status),
            start: new_start,
            end: new_end,
            location: location.unwrap_or(target.location),
            source: RecordSource::Manual,
            corrects: Some(record_id),
            created_at: Local::now().to_rfc3339(),
        };

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut rec = corrected;
        rec.id = insert_record(&tx, &rec)?;

        ttlog(
            &tx,
            "correction",
            driver,
            &format!(
                "record {} superseded by {}: {}",
                record_id,
                rec.id,
                reason.unwrap_or("no reason given")
            ),
        )?;

        tx.commit()?;

        Ok(rec)
    }
}

/// Allowed correction targets are closed, not yet superseded records.
/// Exposed for the CLI to pre-validate without starting a transaction.
pub fn can_correct(pool: &mut DbPool, driver: &str, record_id: i64) -> AppResult<bool> {
    let target = load_record(&pool.conn, record_id)?;
    Ok(target.driver == driver && !target.is_open() && !is_superseded(&pool.conn, record_id)?)
}
