use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `records` table exists.
fn records_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='records'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `records` table with the modern schema (including `corrects`).
fn create_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            driver     TEXT NOT NULL,
            status     TEXT NOT NULL CHECK(status IN ('OFF','SB','D','ON')),
            start_ts   TEXT NOT NULL,
            end_ts     TEXT,
            lat        REAL NOT NULL DEFAULT 0.0,
            lon        REAL NOT NULL DEFAULT 0.0,
            source     TEXT NOT NULL DEFAULT 'manual' CHECK(source IN ('auto','manual')),
            corrects   INTEGER,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_driver_start ON records(driver, start_ts);
        CREATE INDEX IF NOT EXISTS idx_records_driver_open ON records(driver) WHERE end_ts IS NULL;
        "#,
    )?;
    Ok(())
}

/// Check if the `records` table has a `corrects` column.
fn records_has_corrects_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('records')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "corrects" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Migrate a pre-0.3 `records` table to include the `corrects` column.
/// Older databases mutated rows in place; the correction workflow needs
/// the superseding link instead.
fn migrate_add_corrects_column(conn: &Connection) -> Result<()> {
    let version = "20250612_0003_add_corrects_link";

    // 1) Already applied?
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if records_has_corrects_column(conn)? {
        return Ok(());
    }

    // 2) Apply
    conn.execute("ALTER TABLE records ADD COLUMN corrects INTEGER;", [])?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added corrects link to records')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'corrects' to records table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Ensure records table
    if !records_table_exists(conn)? {
        create_records_table(conn)?;
    } else {
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_records_driver_start ON records(driver, start_ts);
            CREATE INDEX IF NOT EXISTS idx_records_driver_open ON records(driver) WHERE end_ts IS NULL;
            "#,
        )?;

        migrate_add_corrects_column(conn)?;
    }

    Ok(())
}
