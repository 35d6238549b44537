use crate::core::calculator::AccountingConfig;
use crate::core::calculator::overtime::{OvertimeReport, accumulate};
use crate::core::logic::Core;
use crate::db::store::ClockStore;
use crate::errors::AppResult;
use crate::utils::duration::format_duration;
use tracing::{debug, info};

/// One full pass: per-day totals, then the overtime balance.
///
/// Always reads from the store; nothing is cached between passes. Work,
/// break and overtime of every day land in a single batch, so a failed
/// write leaves the previous pass intact.
pub fn recompute<S: ClockStore + ?Sized>(
    store: &S,
    cfg: &AccountingConfig,
) -> AppResult<OvertimeReport> {
    // 1️⃣ per-day work and break
    let days = store.list_days_ascending()?;
    let mut updated = Vec::with_capacity(days.len());

    for mut day in days {
        let events = store.list_events_for_day(day.id)?;
        let totals = Core::build_day_totals(&events, cfg.break_policy);

        debug!(
            date = %day.date,
            events = events.len(),
            worked = %format_duration(totals.worked),
            gap_override = totals.gap_override_applied,
            "day totals"
        );

        day.work_duration = format_duration(totals.work);
        day.break_duration = format_duration(totals.break_time);
        updated.push(day);
    }

    // 2️⃣ overtime on the same rows, then one all-or-nothing write
    let report = accumulate(&mut updated, cfg);
    store.batch_update_days(&updated)?;

    info!(
        days = report.days.len(),
        skipped = report.skipped.len(),
        total = %report.total_display(),
        "overtime recomputed"
    );

    Ok(report)
}
