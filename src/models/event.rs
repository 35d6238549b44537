use super::event_type::EventKind;
use chrono::{DateTime, Local, SubsecRound};
use serde::Serialize;

/// A single punch as persisted in the `events` table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClockEvent {
    pub id: i64,                    // ⇔ events.id
    pub kind: EventKind,            // ⇔ events.kind ('Begin' | 'End')
    pub timestamp: DateTime<Local>, // ⇔ events.timestamp (TEXT, RFC 3339)
    pub day_id: i64,                // ⇔ events.day_id → days.id
}

/// A punch that has not been stored yet (no id).
#[derive(Debug, Clone)]
pub struct NewClockEvent {
    pub kind: EventKind,
    pub timestamp: DateTime<Local>,
    pub day_id: i64,
}

impl NewClockEvent {
    pub fn new(kind: EventKind, timestamp: DateTime<Local>, day_id: i64) -> Self {
        Self {
            kind,
            timestamp: timestamp.trunc_subsecs(0),
            day_id,
        }
    }
}

impl ClockEvent {
    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    pub fn get_date_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
