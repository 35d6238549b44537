//! Storage contract used by the accounting engine and the front end.

use crate::errors::AppResult;
use crate::models::{
    day::Day,
    event::{ClockEvent, NewClockEvent},
    vacation::Vacation,
};
use chrono::NaiveDate;

/// One row of the internal `log` table.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Clock-event store.
///
/// Implementations must be usable from several threads; the engine never
/// keeps day or event lists between calls and always reloads from here.
pub trait ClockStore: Send + Sync {
    // Days

    fn list_days_ascending(&self) -> AppResult<Vec<Day>>;

    fn list_days_descending(&self) -> AppResult<Vec<Day>>;

    fn day_by_date(&self, date: NaiveDate) -> AppResult<Option<Day>>;

    fn day_by_id(&self, id: i64) -> AppResult<Option<Day>>;

    /// Insert a day (id 0) or update it by date; returns the stored row.
    fn upsert_day(&self, day: &Day) -> AppResult<Day>;

    /// Write every day in one transaction: all rows or none.
    fn batch_update_days(&self, days: &[Day]) -> AppResult<()>;

    /// Delete a day together with its events.
    fn delete_day(&self, id: i64) -> AppResult<()>;

    // Events

    /// Events of a day in ascending timestamp order.
    fn list_events_for_day(&self, day_id: i64) -> AppResult<Vec<ClockEvent>>;

    fn event_by_id(&self, id: i64) -> AppResult<Option<ClockEvent>>;

    fn append_event(&self, event: NewClockEvent) -> AppResult<ClockEvent>;

    fn update_event(&self, event: &ClockEvent) -> AppResult<()>;

    fn delete_event(&self, id: i64) -> AppResult<()>;

    // Vacations

    fn add_vacation(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vacation>;

    /// Most recent first.
    fn list_vacations(&self) -> AppResult<Vec<Vacation>>;

    fn update_vacation(&self, vacation: &Vacation) -> AppResult<()>;

    fn delete_vacation(&self, id: i64) -> AppResult<()>;

    // Audit log

    fn append_log(&self, operation: &str, target: &str, message: &str) -> AppResult<()>;

    fn list_log(&self) -> AppResult<Vec<LogEntry>>;
}
