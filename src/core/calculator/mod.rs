pub mod breaks;
pub mod overtime;
pub mod timeline;

use breaks::BreakPolicy;
use chrono::Duration;

/// Everything the engine needs from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountingConfig {
    pub weekly_target_hours: u32,
    pub imported_overtime_hours: f64,
    /// Only the front end honours the lock; the engine folds in the value as-is.
    pub import_locked: bool,
    pub break_policy: BreakPolicy,
    /// Seed for incremental recomputation, normally zero.
    pub carried_forward: Duration,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            weekly_target_hours: 40,
            imported_overtime_hours: 0.0,
            import_locked: false,
            break_policy: BreakPolicy::Tiered,
            carried_forward: Duration::zero(),
        }
    }
}
