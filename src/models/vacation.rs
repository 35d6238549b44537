use chrono::NaiveDate;
use serde::Serialize;

/// Inclusive date range. Overlaps with other vacations are allowed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Vacation {
    pub id: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Vacation {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
