//! Running overtime balance across days.

use crate::core::calculator::AccountingConfig;
use crate::models::day::Day;
use crate::utils::duration::{format_duration, format_signed, from_hours, parse_duration};
use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

/// Prorated daily target: a fixed five-day week, no calendar awareness.
pub fn daily_target(weekly_target_hours: u32) -> Duration {
    // weekly hours * 3600 / 5, exact in seconds
    Duration::seconds(i64::from(weekly_target_hours) * 720)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOvertime {
    pub day_id: i64,
    pub date: NaiveDate,
    pub delta: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimeReport {
    pub days: Vec<DayOvertime>,
    /// Days whose stored work duration could not be parsed.
    pub skipped: Vec<NaiveDate>,
    pub daily_target: Duration,
    /// Sum of the per-day deltas only.
    pub days_total: Duration,
    /// `days_total` plus carried-forward and imported balances.
    pub total: Duration,
}

impl OvertimeReport {
    pub fn total_display(&self) -> String {
        format_signed(self.total)
    }
}

/// Compute each day's overtime delta and the running total.
///
/// `days` must be in ascending date order; every day's `overtime` field is
/// rewritten. A day with an unparsable `work_duration` counts as zero.
pub fn accumulate(days: &mut [Day], cfg: &AccountingConfig) -> OvertimeReport {
    let target = daily_target(cfg.weekly_target_hours);

    let mut per_day = Vec::with_capacity(days.len());
    let mut skipped = Vec::new();
    let mut days_total = Duration::zero();

    for day in days.iter_mut() {
        let sum = parse_duration(&day.work_duration)
            .ok()
            .and_then(|work| work.checked_sub(&target))
            .and_then(|delta| days_total.checked_add(&delta).map(|sum| (delta, sum)));

        let delta = match sum {
            Some((delta, sum)) => {
                days_total = sum;
                delta
            }
            None => {
                warn!(
                    date = %day.date,
                    work = %day.work_duration,
                    "skipping day with corrupt work duration"
                );
                skipped.push(day.date);
                Duration::zero()
            }
        };

        day.overtime = format_duration(delta);
        per_day.push(DayOvertime {
            day_id: day.id,
            date: day.date,
            delta,
        });
    }

    let mut total = days_total
        .checked_add(&cfg.carried_forward)
        .unwrap_or_else(|| {
            warn!("carried-forward balance out of range, ignoring it");
            days_total
        });

    if cfg.imported_overtime_hours > 0.0 {
        match from_hours(cfg.imported_overtime_hours).and_then(|h| total.checked_add(&h)) {
            Some(t) => total = t,
            None => warn!(
                value = cfg.imported_overtime_hours,
                "imported overtime out of range, ignoring it"
            ),
        }
    }

    debug!(
        days = per_day.len(),
        skipped = skipped.len(),
        total = %format_signed(total),
        "overtime accumulated"
    );

    OvertimeReport {
        days: per_day,
        skipped,
        daily_target: target,
        days_total,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(id: i64, d: u32, work: &str) -> Day {
        let mut day = Day::new(NaiveDate::from_ymd_opt(2024, 4, d).unwrap());
        day.id = id;
        day.work_duration = work.to_string();
        day
    }

    fn cfg(weekly: u32, imported: f64) -> AccountingConfig {
        AccountingConfig {
            weekly_target_hours: weekly,
            imported_overtime_hours: imported,
            ..AccountingConfig::default()
        }
    }

    #[test]
    fn test_daily_target_is_a_fifth_of_the_week() {
        assert_eq!(daily_target(40), Duration::hours(8));
        assert_eq!(daily_target(38), Duration::minutes(7 * 60 + 36));
    }

    #[test]
    fn test_quarter_hour_of_overtime() {
        let mut days = vec![day(1, 1, "8h15m")];
        let r = accumulate(&mut days, &cfg(40, 0.0));
        assert_eq!(r.total, Duration::minutes(15));
        assert_eq!(days[0].overtime, "15m");
        assert_eq!(r.total_display(), "+15m");
    }

    #[test]
    fn test_undertime_is_negative() {
        let mut days = vec![day(1, 1, "4h")];
        let r = accumulate(&mut days, &cfg(40, 0.0));
        assert_eq!(r.total, Duration::hours(-4));
        assert_eq!(days[0].overtime, "-4h");
    }

    #[test]
    fn test_corrupt_day_counts_as_zero() {
        let mut days = vec![
            day(1, 1, "8h30m"),
            day(2, 2, "9h"),
            day(3, 3, "01.01.1970"),
            day(4, 4, "7h"),
            day(5, 5, "8h"),
        ];
        let r = accumulate(&mut days, &cfg(40, 0.0));
        assert_eq!(r.skipped, vec![NaiveDate::from_ymd_opt(2024, 4, 3).unwrap()]);
        assert_eq!(r.total, Duration::minutes(30 + 60 - 60));
        assert_eq!(days[2].overtime, "0s");
        assert_eq!(r.days.len(), 5);
    }

    #[test]
    fn test_out_of_range_work_duration_is_skipped() {
        let mut days = vec![day(1, 1, "9h"), day(2, 2, "9999999999999999s")];
        let r = accumulate(&mut days, &cfg(40, 0.0));
        assert_eq!(r.skipped, vec![NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()]);
        assert_eq!(r.total, Duration::hours(1));
        assert_eq!(days[1].overtime, "0s");
    }

    #[test]
    fn test_out_of_range_balances_are_ignored() {
        let r = accumulate(&mut [], &cfg(40, 1.0e300));
        assert_eq!(r.total, Duration::zero());

        let mut c = cfg(40, 0.0);
        c.carried_forward = Duration::MAX;
        let mut days = vec![day(1, 1, "9h")];
        let r = accumulate(&mut days, &c);
        assert_eq!(r.total, Duration::hours(1));
    }

    #[test]
    fn test_imported_hours_without_days() {
        let r = accumulate(&mut [], &cfg(40, 10.5));
        assert_eq!(r.total, Duration::minutes(10 * 60 + 30));
        assert_eq!(r.days_total, Duration::zero());
    }

    #[test]
    fn test_negative_import_is_ignored() {
        let r = accumulate(&mut [], &cfg(40, -3.0));
        assert_eq!(r.total, Duration::zero());
    }

    #[test]
    fn test_carried_forward_is_added() {
        let mut c = cfg(40, 1.0);
        c.carried_forward = Duration::minutes(-20);
        let mut days = vec![day(1, 1, "8h")];
        let r = accumulate(&mut days, &c);
        assert_eq!(r.total, Duration::minutes(40));
    }

    #[test]
    fn test_accumulate_is_idempotent() {
        let mut days = vec![day(1, 1, "8h15m"), day(2, 2, "7h50m")];
        let first = accumulate(&mut days, &cfg(40, 2.0));
        let snapshot = days.clone();
        let second = accumulate(&mut days, &cfg(40, 2.0));
        assert_eq!(first, second);
        assert_eq!(snapshot, days);
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_days_plus_balances(
            works in proptest::collection::vec(0i64..(14 * 3600), 0..20),
            imported in -5.0f64..50.0,
            carried in -36_000i64..36_000,
        ) {
            let mut days: Vec<Day> = works
                .iter()
                .enumerate()
                .map(|(i, w)| day(i as i64 + 1, 1 + (i as u32 % 28), &format_duration(Duration::seconds(*w))))
                .collect();

            let mut c = cfg(40, imported);
            c.carried_forward = Duration::seconds(carried);
            let r = accumulate(&mut days, &c);

            let stored: Duration = days
                .iter()
                .map(|d| parse_duration(&d.overtime).unwrap())
                .fold(Duration::zero(), |a, b| a + b);
            let imported = if imported > 0.0 {
                from_hours(imported).unwrap()
            } else {
                Duration::zero()
            };

            prop_assert_eq!(r.total, stored + imported + Duration::seconds(carried));
        }
    }
}
