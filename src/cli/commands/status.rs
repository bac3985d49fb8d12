use crate::cli::commands::resolve_driver;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::hos::limits::{self, CycleRule};
use crate::core::hos::{evaluate, next_warnings};
use crate::db::pool::DbPool;
use crate::db::queries::load_driver_records;
use crate::errors::AppResult;
use crate::models::snapshot::{ComplianceSnapshot, Violation};
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, RED, RESET, color_for_remaining};
use crate::utils::time::{fmt_secs, parse_optional_ts};

/// Evaluate the compliance snapshot and print it with upcoming warnings.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { driver, at, json } = cmd {
        let driver = resolve_driver(driver.as_deref(), cfg)?;

        let as_of =
            parse_optional_ts(at.as_ref())?.unwrap_or_else(|| chrono::Local::now().naive_local());

        let cycle = CycleRule::from_code(&cfg.cycle)?;

        let mut pool = DbPool::new(&cfg.database)?;
        let records = load_driver_records(&mut pool, &driver)?;

        let snapshot = evaluate(&driver, &records, as_of, cycle);
        let warnings = next_warnings(&snapshot);

        if *json {
            let payload = serde_json::json!({
                "snapshot": snapshot,
                "warnings": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&payload).unwrap());
            return Ok(());
        }

        print_snapshot(&snapshot);

        if !warnings.is_empty() {
            println!("\nUpcoming warnings:");
            for w in &warnings {
                println!(
                    "  {} {:<28} {:>3} min lead  [{}]",
                    w.due.format("%Y-%m-%d %H:%M"),
                    w.limit.label(),
                    w.lead_secs / 60,
                    w.severity.label(),
                );
            }
        }
    }

    Ok(())
}

fn print_snapshot(s: &ComplianceSnapshot) {
    println!("\n=== {} @ {} ===", s.driver, s.as_of.format("%Y-%m-%d %H:%M:%S"));
    println!(
        "{}Current status:{} {}  {}Cycle:{} {}",
        CYAN,
        RESET,
        s.current_status.label(),
        CYAN,
        RESET,
        s.cycle.code()
    );

    print_limit_line(
        "Driving (11h limit)",
        s.drive_since_rest_secs,
        limits::DRIVE_LIMIT_SECS,
        s.remaining_secs(Violation::DriveLimitExceeded),
    );
    print_limit_line(
        "Duty window (14h)",
        s.duty_window_secs,
        limits::DUTY_WINDOW_SECS,
        s.remaining_secs(Violation::DutyWindowExceeded),
    );
    print_limit_line(
        &format!("Cycle ({})", s.cycle.code()),
        s.cycle_drive_secs,
        s.cycle.limit_secs(),
        s.remaining_secs(Violation::CycleLimitExceeded),
    );
    print_limit_line(
        "Since break (8h)",
        s.drive_since_break_secs,
        limits::BREAK_TRIGGER_SECS,
        s.remaining_secs(Violation::BreakRequired),
    );

    if let Some(r) = s.last_restart_end {
        println!(
            "{}Last 34h restart ended:{} {}",
            CYAN,
            RESET,
            r.format("%Y-%m-%d %H:%M")
        );
    }

    if s.violations.is_empty() {
        println!("\nNo violations.");
    } else {
        println!();
        for v in &s.violations {
            warning(format!("{}{}{} ({})", RED, v.code(), RESET, v.label()));
        }
    }
}

fn print_limit_line(label: &str, used: i64, limit: i64, remaining: i64) {
    println!(
        "{:<22} {} / {}   {}{} left{}",
        label,
        fmt_secs(used),
        fmt_secs(limit),
        color_for_remaining(remaining),
        fmt_secs(remaining),
        RESET,
    );
}
