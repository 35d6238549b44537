use crate::utils::duration::ZERO_DURATION;
use chrono::NaiveDate;
use serde::Serialize;

/// One calendar date and its derived totals.
///
/// The duration fields hold the persisted text form (see
/// [`crate::utils::duration`]); they are parsed only where the engine
/// needs the structured value.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Day {
    pub id: i64,                // ⇔ days.id
    pub date: NaiveDate,        // ⇔ days.date (TEXT "YYYY-MM-DD", UNIQUE)
    pub work_duration: String,  // ⇔ days.work_duration
    pub break_duration: String, // ⇔ days.break_duration
    pub overtime: String,       // ⇔ days.overtime
}

impl Day {
    /// A not-yet-stored day with zeroed totals.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: 0,
            date,
            work_duration: ZERO_DURATION.to_string(),
            break_duration: ZERO_DURATION.to_string(),
            overtime: ZERO_DURATION.to_string(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
