use rusqlite::{Connection, OptionalExtension, Result};
use tracing::{debug, info, warn};

/// Ensure that the `log` table exists.
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

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create `days`, `events` and `vacations` if missing.
fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS days (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            date            TEXT NOT NULL UNIQUE,
            work_duration   TEXT NOT NULL DEFAULT '0s',
            break_duration  TEXT NOT NULL DEFAULT '0s',
            overtime        TEXT NOT NULL DEFAULT '0s'
        );

        CREATE TABLE IF NOT EXISTS events (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            kind       TEXT NOT NULL CHECK(kind IN ('Begin','End')),
            timestamp  TEXT NOT NULL,
            day_id     INTEGER NOT NULL REFERENCES days(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS vacations (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Databases created before overtime tracking have no `overtime` column.
fn migrate_add_overtime_column(conn: &Connection) -> Result<()> {
    if column_exists(conn, "days", "overtime")? {
        return Ok(());
    }

    warn!("Adding 'overtime' column to days table");

    conn.execute(
        "ALTER TABLE days ADD COLUMN overtime TEXT NOT NULL DEFAULT '0s'",
        [],
    )?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', 'days.overtime', 'Added overtime column to days')",
        [],
    )?;

    info!("Migration applied: added 'overtime' to days table");
    Ok(())
}

fn ensure_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_events_day ON events(day_id);
        CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp);
        CREATE INDEX IF NOT EXISTS idx_days_date ON days(date);
        "#,
    )?;
    Ok(())
}

/// Public entry point: bring the schema up to date.
///
/// Invoked every time a store is opened.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let fresh = !table_exists(conn, "days")?;
    create_tables(conn)?;

    if fresh {
        debug!("Created days/events/vacations tables");
    } else {
        migrate_add_overtime_column(conn)?;
    }

    ensure_indexes(conn)?;
    Ok(())
}
