use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::change::ChangeLogic;
use crate::core::motion::{MotionDetector, SpeedSample};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::load_open_record;
use crate::errors::{AppError, AppResult};
use crate::models::geo::GeoPoint;
use crate::models::source::RecordSource;
use crate::ui::messages::{info, success};
use crate::utils::time::parse_ts;

/// Feed telemetry samples through the motion detector and record the
/// resulting transitions with source=auto.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ingest { driver, file } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        // Prime with the current status so a driver already marked as
        // Driving does not produce a duplicate transition.
        let current = load_open_record(&pool.conn, driver)?.map(|r| r.status);
        let mut detector = MotionDetector::new(current);

        let mut rdr = csv::Reader::from_path(file)
            .map_err(|e| AppError::Other(format!("Cannot read samples file: {e}")))?;

        let mut samples = 0usize;
        let mut transitions = 0usize;

        for result in rdr.records() {
            let row = result.map_err(|e| AppError::Other(format!("CSV parse error: {e}")))?;

            let sample = parse_sample(&row)?;
            samples += 1;

            if let Some(t) = detector.observe(&sample) {
                ChangeLogic::apply(
                    &mut pool,
                    driver,
                    t.status,
                    t.at,
                    t.location,
                    RecordSource::Auto,
                )?;
                transitions += 1;

                info(format!(
                    "Auto transition: {} at {}",
                    t.status.label(),
                    t.at.format("%Y-%m-%d %H:%M:%S")
                ));
            }
        }

        ttlog(
            &pool.conn,
            "ingest",
            driver,
            &format!("{} samples, {} transitions", samples, transitions),
        )?;

        success(format!(
            "Ingested {} samples for driver {} ({} transitions)",
            samples, driver, transitions
        ));
    }

    Ok(())
}

/// Columns: ts,speed_mph,engine_on[,lat,lon]
fn parse_sample(row: &csv::StringRecord) -> AppResult<SpeedSample> {
    let ts_raw = row
        .get(0)
        .ok_or_else(|| AppError::Other("sample row missing timestamp".into()))?;
    let ts = parse_ts(ts_raw).ok_or_else(|| AppError::InvalidTimestamp(ts_raw.to_string()))?;

    let speed_mph: f64 = row
        .get(1)
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| AppError::Other("sample row missing speed_mph".into()))?;

    let engine_on = matches!(
        row.get(2).map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("1") | Some("true") | Some("yes")
    );

    let location = match (row.get(3), row.get(4)) {
        (Some(lat), Some(lon)) if !lat.trim().is_empty() => {
            GeoPoint::parse(&format!("{},{}", lat, lon))
                .ok_or_else(|| AppError::InvalidCoordinate(format!("{},{}", lat, lon)))?
        }
        _ => GeoPoint::unknown(),
    };

    Ok(SpeedSample {
        ts,
        speed_mph,
        engine_on,
        location,
    })
}
