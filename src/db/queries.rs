use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::geo::GeoPoint;
use crate::models::record::{DutyRecord, TS_FMT};
use crate::models::source::RecordSource;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<DutyRecord> {
    let start_str: String = row.get("start_ts")?;
    let end_str: Option<String> = row.get("end_ts")?;

    let start = parse_ts_col(&start_str)?;
    let end = match end_str {
        Some(s) => Some(parse_ts_col(&s)?),
        None => None,
    };

    let status_str: String = row.get("status")?;
    let status = DutyStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    let source_str: String = row.get("source")?;
    let source = RecordSource::from_db_str(&source_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid source: {}", source_str))),
        )
    })?;

    Ok(DutyRecord {
        id: row.get("id")?,
        driver: row.get("driver")?,
        status,
        start,
        end,
        location: GeoPoint {
            lat: row.get("lat")?,
            lon: row.get("lon")?,
        },
        source,
        corrects: row.get("corrects")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_ts_col(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(s.to_string())),
        )
    })
}

/// All records for a driver, corrections included, ordered by start.
pub fn load_driver_records(pool: &mut DbPool, driver: &str) -> AppResult<Vec<DutyRecord>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM records
         WHERE driver = ?1
         ORDER BY start_ts ASC, id ASC",
    )?;

    let rows = stmt.query_map([driver], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The single open record of a driver, if any.
pub fn load_open_record(conn: &Connection, driver: &str) -> AppResult<Option<DutyRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM records
         WHERE driver = ?1 AND end_ts IS NULL
         ORDER BY start_ts DESC
         LIMIT 1",
    )?;

    let rec = stmt.query_row([driver], map_row).optional()?;
    Ok(rec)
}

pub fn load_record(conn: &Connection, id: i64) -> AppResult<DutyRecord> {
    let mut stmt = conn.prepare("SELECT * FROM records WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or(AppError::RecordNotFound(id))
}

/// True if some other record supersedes this one.
pub fn is_superseded(conn: &Connection, id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM records WHERE corrects = ?1 LIMIT 1")?;
    Ok(stmt.exists([id])?)
}

pub fn insert_record(conn: &Connection, rec: &DutyRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO records (driver, status, start_ts, end_ts, lat, lon, source, corrects, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            rec.driver,
            rec.status.to_db_str(),
            rec.start_str(),
            rec.end_str(),
            rec.location.lat,
            rec.location.lon,
            rec.source.to_db_str(),
            rec.corrects,
            rec.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Set end_ts on an open record. Closed records are never touched again.
pub fn close_record(conn: &Connection, id: i64, end: NaiveDateTime) -> AppResult<()> {
    conn.execute(
        "UPDATE records SET end_ts = ?1 WHERE id = ?2 AND end_ts IS NULL",
        params![end.format(TS_FMT).to_string(), id],
    )?;
    Ok(())
}

pub fn list_drivers(pool: &mut DbPool) -> AppResult<Vec<String>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT DISTINCT driver FROM records ORDER BY driver ASC")?;

    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Records whose start date falls inside the inclusive date bounds.
pub fn load_records_between(
    pool: &mut DbPool,
    driver: &str,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<DutyRecord>> {
    match bounds {
        None => load_driver_records(pool, driver),
        Some((from, to)) => {
            let from_str = from.format("%Y-%m-%d").to_string();
            // end of day, inclusive
            let to_str = format!("{} 23:59:59", to.format("%Y-%m-%d"));

            let mut stmt = pool.conn.prepare(
                "SELECT * FROM records
                 WHERE driver = ?1 AND start_ts >= ?2 AND start_ts <= ?3
                 ORDER BY start_ts ASC, id ASC",
            )?;

            let rows = stmt.query_map(params![driver, from_str, to_str], map_row)?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        }
    }
}

pub fn load_log(pool: &mut DbPool) -> Result<Vec<(String, String, String)>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT date, operation, message FROM log ORDER BY date DESC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }

    Ok(out)
}

/// Retention purge: delete closed records that ended before the cutoff.
/// Open records and records newer than the cutoff are kept.
pub fn prune_closed_before(conn: &Connection, cutoff: NaiveDateTime) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM records WHERE end_ts IS NOT NULL AND end_ts < ?1",
        params![cutoff.format(TS_FMT).to_string()],
    )?;
    Ok(n)
}
