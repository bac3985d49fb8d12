use crate::cli::commands::resolve_driver;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::resolve_corrections;
use crate::db::pool::DbPool;
use crate::db::queries::load_records_between;
use crate::errors::{AppError, AppResult};
use crate::models::duty_status::DutyStatus;
use crate::models::record::DutyRecord;
use crate::utils::colors::{GREY, RESET, color_for_status};
use crate::utils::date;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        driver,
        period,
        status,
        raw,
    } = cmd
    {
        let driver = resolve_driver(driver.as_deref(), cfg)?;

        let status_filter = match status {
            Some(code) => Some(DutyStatus::from_code(code).ok_or_else(|| {
                AppError::InvalidStatus(format!(
                    "Invalid duty status '{}'. Use OFF, SB, D or ON.",
                    code
                ))
            })?),
            None => None,
        };

        let bounds = resolve_period(period)?;

        let mut pool = DbPool::new(&cfg.database)?;
        let records = load_records_between(&mut pool, &driver, bounds)?;

        if records.is_empty() {
            println!("No records for driver {}", driver);
            return Ok(());
        }

        let visible = if *raw {
            records
        } else {
            resolve_corrections(&records)
        };

        println!("\n=== {} ===", driver);
        for rec in visible
            .iter()
            .filter(|r| status_filter.is_none_or(|s| r.status == s))
        {
            print_record(rec);
        }
    }
    Ok(())
}

fn resolve_period(period: &Option<String>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let Some(p) = period else {
        return Ok(None);
    };

    if p == "all" {
        return Ok(None);
    }

    let bounds = if let Some((start, end)) = p.split_once(':') {
        date::range_bounds(start, end)
    } else {
        date::period_bounds(p)
    };

    bounds.map(Some).map_err(AppError::InvalidDate)
}

fn print_record(rec: &DutyRecord) {
    let code = rec.status.to_db_str();
    let end = rec
        .end_str()
        .unwrap_or_else(|| format!("{GREY}(open){RESET}"));
    let corrected = match rec.corrects {
        Some(old) => format!(" {GREY}corrects #{old}{RESET}"),
        None => String::new(),
    };

    println!(
        "#{:<5} {}{:<4}{} {} → {}  [{}]{}",
        rec.id,
        color_for_status(code),
        code,
        RESET,
        rec.start_str(),
        end,
        rec.source.to_db_str(),
        corrected,
    );
}
