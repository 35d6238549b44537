//! SQLite-backed [`ClockStore`].

use crate::db::log::{load_log, ttlog};
use crate::db::migrate::run_pending_migrations;
use crate::db::store::{ClockStore, LogEntry};
use crate::errors::{AppError, AppResult};
use crate::models::{
    day::Day,
    event::{ClockEvent, NewClockEvent},
    event_type::EventKind,
    vacation::Vacation,
};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

const DATE_FMT: &str = "%Y-%m-%d";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> AppResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> AppResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        run_pending_migrations(&conn)?;
        debug!("Store schema ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Store("connection lock poisoned".into()))
    }
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date_col(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FMT)
        .map_err(|_| conversion_error(idx, AppError::InvalidDate(raw.clone())))
}

fn map_day(row: &Row) -> rusqlite::Result<Day> {
    Ok(Day {
        id: row.get(0)?,
        date: parse_date_col(row, 1)?,
        work_duration: row.get(2)?,
        break_duration: row.get(3)?,
        overtime: row.get(4)?,
    })
}

fn map_event(row: &Row) -> rusqlite::Result<ClockEvent> {
    let kind_str: String = row.get(1)?;
    let kind = EventKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(1, AppError::InvalidEventKind(kind_str.clone())))?;

    let ts_str: String = row.get(2)?;
    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| conversion_error(2, AppError::InvalidTime(ts_str.clone())))?;

    Ok(ClockEvent {
        id: row.get(0)?,
        kind,
        timestamp,
        day_id: row.get(3)?,
    })
}

fn map_vacation(row: &Row) -> rusqlite::Result<Vacation> {
    Ok(Vacation {
        id: row.get(0)?,
        start: parse_date_col(row, 1)?,
        end: parse_date_col(row, 2)?,
    })
}

const DAY_COLUMNS: &str = "id, date, work_duration, break_duration, overtime";
const EVENT_COLUMNS: &str = "id, kind, timestamp, day_id";

fn query_days(conn: &Connection, order: &str) -> AppResult<Vec<Day>> {
    let mut stmt = conn.prepare(&format!("SELECT {DAY_COLUMNS} FROM days ORDER BY date {order}"))?;
    let rows = stmt.query_map([], map_day)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

impl ClockStore for SqliteStore {
    fn list_days_ascending(&self) -> AppResult<Vec<Day>> {
        let conn = self.conn()?;
        query_days(&conn, "ASC")
    }

    fn list_days_descending(&self) -> AppResult<Vec<Day>> {
        let conn = self.conn()?;
        query_days(&conn, "DESC")
    }

    fn day_by_date(&self, date: NaiveDate) -> AppResult<Option<Day>> {
        let conn = self.conn()?;
        let day = conn
            .query_row(
                &format!("SELECT {DAY_COLUMNS} FROM days WHERE date = ?1"),
                [date.format(DATE_FMT).to_string()],
                map_day,
            )
            .optional()?;
        Ok(day)
    }

    fn day_by_id(&self, id: i64) -> AppResult<Option<Day>> {
        let conn = self.conn()?;
        let day = conn
            .query_row(
                &format!("SELECT {DAY_COLUMNS} FROM days WHERE id = ?1"),
                [id],
                map_day,
            )
            .optional()?;
        Ok(day)
    }

    fn upsert_day(&self, day: &Day) -> AppResult<Day> {
        let conn = self.conn()?;
        let date = day.date_str();

        conn.execute(
            "INSERT INTO days (date, work_duration, break_duration, overtime)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                work_duration = excluded.work_duration,
                break_duration = excluded.break_duration,
                overtime = excluded.overtime",
            params![date, day.work_duration, day.break_duration, day.overtime],
        )?;

        let stored = conn.query_row(
            &format!("SELECT {DAY_COLUMNS} FROM days WHERE date = ?1"),
            [&date],
            map_day,
        )?;
        Ok(stored)
    }

    fn batch_update_days(&self, days: &[Day]) -> AppResult<()> {
        let mut conn = self.conn()?;

        let write = |conn: &mut Connection| -> AppResult<()> {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "UPDATE days
                     SET work_duration = ?1, break_duration = ?2, overtime = ?3
                     WHERE id = ?4",
                )?;

                for day in days {
                    let changed = stmt.execute(params![
                        day.work_duration,
                        day.break_duration,
                        day.overtime,
                        day.id
                    ])?;
                    if changed == 0 {
                        return Err(AppError::DayNotFound(day.date_str()));
                    }
                }
            }
            tx.commit()?;
            Ok(())
        };

        // dropping the uncommitted transaction rolls everything back
        write(&mut *conn).map_err(|e| {
            AppError::Store(format!("batch update of {} days failed: {e}", days.len()))
        })?;

        debug!(days = days.len(), "Batch update committed");
        Ok(())
    }

    fn delete_day(&self, id: i64) -> AppResult<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM events WHERE day_id = ?1", [id])?;
        tx.execute("DELETE FROM days WHERE id = ?1", [id])?;
        tx.commit()?;
        Ok(())
    }

    fn list_events_for_day(&self, day_id: i64) -> AppResult<Vec<ClockEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE day_id = ?1 ORDER BY timestamp ASC, id ASC"
        ))?;
        let rows = stmt.query_map([day_id], map_event)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }

        // text order breaks when the UTC offset changed during the day
        out.sort_by_key(|e| e.timestamp);
        Ok(out)
    }

    fn event_by_id(&self, id: i64) -> AppResult<Option<ClockEvent>> {
        let conn = self.conn()?;
        let ev = conn
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
                [id],
                map_event,
            )
            .optional()?;
        Ok(ev)
    }

    fn append_event(&self, event: NewClockEvent) -> AppResult<ClockEvent> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO events (kind, timestamp, day_id) VALUES (?1, ?2, ?3)",
            params![
                event.kind.to_db_str(),
                event.timestamp.to_rfc3339(),
                event.day_id
            ],
        )?;

        Ok(ClockEvent {
            id: conn.last_insert_rowid(),
            kind: event.kind,
            timestamp: event.timestamp,
            day_id: event.day_id,
        })
    }

    fn update_event(&self, event: &ClockEvent) -> AppResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE events SET kind = ?1, timestamp = ?2 WHERE id = ?3",
            params![
                event.kind.to_db_str(),
                event.timestamp.to_rfc3339(),
                event.id
            ],
        )?;
        if changed == 0 {
            return Err(AppError::EventNotFound(event.id));
        }
        Ok(())
    }

    fn delete_event(&self, id: i64) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM events WHERE id = ?1", [id])?;
        Ok(())
    }

    fn add_vacation(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vacation> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO vacations (start_date, end_date) VALUES (?1, ?2)",
            params![
                start.format(DATE_FMT).to_string(),
                end.format(DATE_FMT).to_string()
            ],
        )?;
        Ok(Vacation {
            id: conn.last_insert_rowid(),
            start,
            end,
        })
    }

    fn list_vacations(&self) -> AppResult<Vec<Vacation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, start_date, end_date FROM vacations ORDER BY start_date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], map_vacation)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn update_vacation(&self, vacation: &Vacation) -> AppResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE vacations SET start_date = ?1, end_date = ?2 WHERE id = ?3",
            params![
                vacation.start.format(DATE_FMT).to_string(),
                vacation.end.format(DATE_FMT).to_string(),
                vacation.id
            ],
        )?;
        if changed == 0 {
            return Err(AppError::InvalidVacation(format!(
                "no vacation with id {}",
                vacation.id
            )));
        }
        Ok(())
    }

    fn delete_vacation(&self, id: i64) -> AppResult<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM vacations WHERE id = ?1", [id])?;
        Ok(())
    }

    fn append_log(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let conn = self.conn()?;
        ttlog(&conn, operation, target, message)?;
        Ok(())
    }

    fn list_log(&self) -> AppResult<Vec<LogEntry>> {
        let conn = self.conn()?;
        Ok(load_log(&conn)?)
    }
}
