use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL RECORDS / DRIVERS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
    println!(
        "{}• Total records:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    let drivers: i64 = pool
        .conn
        .query_row("SELECT COUNT(DISTINCT driver) FROM records", [], |row| {
            row.get(0)
        })?;
    println!("{}• Drivers:{} {}{}{}", CYAN, RESET, GREEN, drivers, RESET);

    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM records WHERE end_ts IS NULL",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Open records:{} {}", CYAN, RESET, open);

    //
    // 3) TIME RANGE
    //
    let first_ts: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_ts FROM records ORDER BY start_ts ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_ts: Option<String> = pool
        .conn
        .query_row(
            "SELECT start_ts FROM records ORDER BY start_ts DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_ts.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_ts.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Time range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
