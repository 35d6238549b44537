use crate::core::calculator::breaks::{BreakPolicy, mandated_break};
use crate::core::calculator::timeline;
use crate::models::{day_totals::DayTotals, event::ClockEvent};
use chrono::Duration;

pub struct Core;

impl Core {
    /// Worked time, break and net work time for one day's events.
    pub fn build_day_totals(events: &[ClockEvent], policy: BreakPolicy) -> DayTotals {
        let timeline = timeline::build_timeline(events);
        let worked = timeline.worked;

        if policy == BreakPolicy::GapOverride && timeline.gaps != Duration::zero() {
            // The gaps already sit outside every Begin → End span.
            return DayTotals {
                worked,
                work: worked,
                break_time: timeline.gaps,
                gap_override_applied: true,
            };
        }

        let break_time = mandated_break(worked);
        DayTotals {
            worked,
            work: worked - break_time,
            break_time,
            gap_override_applied: false,
        }
    }
}
