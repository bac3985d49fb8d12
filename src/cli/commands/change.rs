use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::change::ChangeLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::geo::GeoPoint;
use crate::models::source::RecordSource;
use crate::ui::messages::success;
use crate::utils::time::parse_optional_ts;

/// Record a duty-status change.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Change {
        driver,
        status,
        at,
        pos,
        auto,
    } = cmd
    {
        //
        // 1. Parse status (mandatory)
        //
        let new_status = DutyStatus::from_code(status).ok_or_else(|| {
            AppError::InvalidStatus(format!(
                "Invalid duty status '{}'. Use OFF, SB, D or ON.",
                status
            ))
        })?;

        //
        // 2. Parse timestamp (optional, defaults to now)
        //
        let timestamp = parse_optional_ts(at.as_ref())?
            .unwrap_or_else(|| chrono::Local::now().naive_local());

        //
        // 3. Parse position (optional)
        //
        let location = match pos {
            Some(p) => GeoPoint::parse(p)
                .ok_or_else(|| AppError::InvalidCoordinate(p.to_string()))?,
            None => GeoPoint::unknown(),
        };

        let source = if *auto {
            RecordSource::Auto
        } else {
            RecordSource::Manual
        };

        //
        // 4. Open DB and execute
        //
        let mut pool = DbPool::new(&cfg.database)?;

        let rec = ChangeLogic::apply(&mut pool, driver, new_status, timestamp, location, source)?;

        success(format!(
            "Driver {} is now {} (record {}, since {})",
            driver,
            rec.status.label(),
            rec.id,
            rec.start_str()
        ));
    }

    Ok(())
}
