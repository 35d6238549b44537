use chrono::Duration;

/// Result of the per-day calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTotals {
    /// Raw Begin → End time.
    pub worked: Duration,
    /// Worked time minus break (or raw worked time when the gap override won).
    pub work: Duration,
    pub break_time: Duration,
    pub gap_override_applied: bool,
}
