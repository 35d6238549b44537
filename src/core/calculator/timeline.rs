use crate::models::event::ClockEvent;
use chrono::{Duration, SubsecRound};

#[derive(Debug, Default, Clone)]
pub struct Timeline {
    /// Events sorted by timestamp, truncated to whole seconds.
    pub events: Vec<ClockEvent>,
    /// Sum of every Begin → next event span.
    pub worked: Duration,
    /// Idle time between punch pairs, see [`gap_sum`].
    pub gaps: Duration,
}

pub fn build_timeline(events: &[ClockEvent]) -> Timeline {
    if events.is_empty() {
        return Timeline::default();
    }

    // -----------------------------
    // Sort events chronologically
    // -----------------------------
    let mut sorted: Vec<ClockEvent> = events
        .iter()
        .cloned()
        .map(|mut e| {
            e.timestamp = e.timestamp.trunc_subsecs(0);
            e
        })
        .collect();
    sorted.sort_by_key(|e| e.timestamp);

    // -----------------------------
    // Worked time
    // -----------------------------
    // Only spans opened by a Begin count. A span opened by an End is idle
    // time on a well-formed day and double counting on a malformed one.
    let worked = sorted
        .windows(2)
        .filter(|w| w[0].kind.is_begin())
        .fold(Duration::zero(), |acc, w| acc + (w[1].timestamp - w[0].timestamp));

    let gaps = gap_sum(&sorted);

    Timeline {
        events: sorted,
        worked,
        gaps,
    }
}

/// Idle time between punch pairs.
///
/// Only defined for an even number of at least four events: the two most
/// recent events are peeled off while the remaining count stays even and
/// above two, adding `next Begin - previous End` for every peeled pair.
/// Pairs whose kinds are not End → Begin add nothing.
pub fn gap_sum(sorted: &[ClockEvent]) -> Duration {
    let n = sorted.len();
    if n < 4 || n % 2 != 0 {
        return Duration::zero();
    }

    let mut remaining = n;
    let mut sum = Duration::zero();

    while remaining > 2 && remaining % 2 == 0 {
        let next_begin = &sorted[remaining - 2];
        let previous_end = &sorted[remaining - 3];

        if next_begin.kind.is_begin() && previous_end.kind.is_end() {
            sum += next_begin.timestamp - previous_end.timestamp;
        }

        remaining -= 2;
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event_type::EventKind;
    use chrono::{Local, NaiveDate, TimeZone, Timelike};

    fn ev(id: i64, kind: EventKind, h: u32, m: u32) -> ClockEvent {
        let ts = Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 3, 5)
                    .unwrap()
                    .and_hms_opt(h, m, 0)
                    .unwrap(),
            )
            .single()
            .unwrap();
        ClockEvent {
            id,
            kind,
            timestamp: ts,
            day_id: 1,
        }
    }

    #[test]
    fn test_empty_day() {
        let t = build_timeline(&[]);
        assert_eq!(t.worked, Duration::zero());
        assert_eq!(t.gaps, Duration::zero());
    }

    #[test]
    fn test_single_pair() {
        let t = build_timeline(&[ev(1, EventKind::Begin, 8, 0), ev(2, EventKind::End, 12, 0)]);
        assert_eq!(t.worked, Duration::hours(4));
        assert_eq!(t.gaps, Duration::zero());
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let t = build_timeline(&[ev(2, EventKind::End, 12, 0), ev(1, EventKind::Begin, 8, 0)]);
        assert_eq!(t.events[0].id, 1);
        assert_eq!(t.worked, Duration::hours(4));
    }

    #[test]
    fn test_trailing_begin_contributes_nothing() {
        let t = build_timeline(&[
            ev(1, EventKind::Begin, 8, 0),
            ev(2, EventKind::End, 12, 0),
            ev(3, EventKind::Begin, 13, 0),
        ]);
        assert_eq!(t.worked, Duration::hours(4));
    }

    #[test]
    fn test_span_opened_by_end_is_not_summed() {
        // End, End, Begin, End: only the last span counts
        let t = build_timeline(&[
            ev(1, EventKind::End, 7, 0),
            ev(2, EventKind::End, 8, 0),
            ev(3, EventKind::Begin, 9, 0),
            ev(4, EventKind::End, 10, 0),
        ]);
        assert_eq!(t.worked, Duration::hours(1));
    }

    #[test]
    fn test_gap_sum_over_three_pairs() {
        let events = [
            ev(1, EventKind::Begin, 8, 0),
            ev(2, EventKind::End, 10, 0),
            ev(3, EventKind::Begin, 10, 15),
            ev(4, EventKind::End, 12, 0),
            ev(5, EventKind::Begin, 12, 45),
            ev(6, EventKind::End, 16, 0),
        ];
        let t = build_timeline(&events);
        assert_eq!(t.gaps, Duration::minutes(60));
        assert_eq!(t.worked, Duration::minutes(2 * 60 + 105 + 195));
    }

    #[test]
    fn test_gap_sum_needs_even_count_of_four() {
        let odd = [
            ev(1, EventKind::Begin, 8, 0),
            ev(2, EventKind::End, 10, 0),
            ev(3, EventKind::Begin, 11, 0),
            ev(4, EventKind::End, 12, 0),
            ev(5, EventKind::Begin, 13, 0),
        ];
        assert_eq!(gap_sum(&odd), Duration::zero());
        assert_eq!(gap_sum(&odd[..2]), Duration::zero());
    }

    #[test]
    fn test_subseconds_are_truncated() {
        let mut begin = ev(1, EventKind::Begin, 8, 0);
        begin.timestamp = begin.timestamp.with_nanosecond(900_000_000).unwrap();
        let t = build_timeline(&[begin, ev(2, EventKind::End, 9, 0)]);
        assert_eq!(t.worked, Duration::hours(1));
    }
}
