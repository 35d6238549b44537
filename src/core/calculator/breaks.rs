//! Mandated break time derived from how long somebody worked on a day.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// How break time is inferred for a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakPolicy {
    /// Tier table only.
    #[default]
    Tiered,
    /// Idle gaps between punch pairs replace the tier table when non-zero.
    GapOverride,
}

impl BreakPolicy {
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "tiered" => Some(Self::Tiered),
            "gap_override" | "gap" => Some(Self::GapOverride),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BreakPolicy::Tiered => "tiered",
            BreakPolicy::GapOverride => "gap_override",
        }
    }
}

const SHORT_DAY_HOURS: i64 = 6;
const LONG_DAY_HOURS: i64 = 9;

const SHORT_DAY_BREAK_MINUTES: i64 = 30;
const LONG_DAY_BREAK_MINUTES: i64 = 45;

// Unreachable with the tiers above.
const FALLBACK_BREAK_MINUTES: i64 = 30;

/// Tier table:
/// - below 6h → no break
/// - 6h up to 9h → 30 minutes
/// - 9h and more → 45 minutes
pub fn mandated_break(worked: Duration) -> Duration {
    let short_day = Duration::hours(SHORT_DAY_HOURS);
    let long_day = Duration::hours(LONG_DAY_HOURS);

    match worked {
        w if w < short_day => Duration::zero(),
        w if w < long_day => Duration::minutes(SHORT_DAY_BREAK_MINUTES),
        w if w >= long_day => Duration::minutes(LONG_DAY_BREAK_MINUTES),
        _ => Duration::minutes(FALLBACK_BREAK_MINUTES),
    }
}
