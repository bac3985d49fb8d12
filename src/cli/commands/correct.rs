use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::correct::CorrectLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::geo::GeoPoint;
use crate::ui::messages::success;
use crate::utils::time::parse_optional_ts;

/// Supersede a closed record with a corrected copy.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Correct {
        driver,
        record,
        status,
        start,
        end,
        pos,
        reason,
    } = cmd
    {
        let new_status = match status {
            Some(code) => Some(DutyStatus::from_code(code).ok_or_else(|| {
                AppError::InvalidStatus(format!(
                    "Invalid duty status '{}'. Use OFF, SB, D or ON.",
                    code
                ))
            })?),
            None => None,
        };

        let new_start = parse_optional_ts(start.as_ref())?;
        let new_end = parse_optional_ts(end.as_ref())?;

        let new_location = match pos {
            Some(p) => Some(
                GeoPoint::parse(p).ok_or_else(|| AppError::InvalidCoordinate(p.to_string()))?,
            ),
            None => None,
        };

        let mut pool = DbPool::new(&cfg.database)?;

        let rec = CorrectLogic::apply(
            &mut pool,
            driver,
            *record,
            new_status,
            new_start,
            new_end,
            new_location,
            reason.as_deref(),
        )?;

        success(format!(
            "Record {} superseded by record {} for driver {}",
            record, rec.id, driver
        ));
    }

    Ok(())
}
