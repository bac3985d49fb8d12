use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{close_record, insert_record, load_open_record};
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::geo::GeoPoint;
use crate::models::record::{DutyRecord, TS_FMT};
use crate::models::source::RecordSource;
use chrono::NaiveDateTime;
use rusqlite::TransactionBehavior;

/// The single entry point for duty-status transitions. Manual driver
/// actions and automatic GPS/speed detection both land here; the source
/// tag is the only difference.
pub struct ChangeLogic;

impl ChangeLogic {
    /// Close the driver's open record at `timestamp` and open a new one,
    /// atomically. Rejections leave the log untouched.
    pub fn apply(
        pool: &mut DbPool,
        driver: &str,
        new_status: DutyStatus,
        timestamp: NaiveDateTime,
        location: GeoPoint,
        source: RecordSource,
    ) -> AppResult<DutyRecord> {
        let open = load_open_record(&pool.conn, driver)?;

        // A driver with no history is off duty.
        let current = open
            .as_ref()
            .map(|r| r.status)
            .unwrap_or(DutyStatus::OffDuty);

        if new_status == current {
            return Err(AppError::InvalidTransition {
                driver: driver.to_string(),
                status: current.to_db_str().to_string(),
            });
        }

        if let Some(o) = &open
            && timestamp < o.start
        {
            return Err(AppError::OutOfOrderTimestamp {
                driver: driver.to_string(),
                timestamp: timestamp.format(TS_FMT).to_string(),
                open_start: o.start_str(),
            });
        }

        // Atomic close-and-open: a reader sees the old state or the new
        // state, never a half-closed record.
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if let Some(o) = &open {
            close_record(&tx, o.id, timestamp)?;
        }

        let mut rec = DutyRecord::open(driver, new_status, timestamp, location, source);
        rec.id = insert_record(&tx, &rec)?;

        ttlog(
            &tx,
            "status_change",
            driver,
            &format!(
                "{} -> {} at {} ({})",
                current.to_db_str(),
                new_status.to_db_str(),
                rec.start_str(),
                rec.source.to_db_str()
            ),
        )?;

        tx.commit()?;

        Ok(rec)
    }
}
