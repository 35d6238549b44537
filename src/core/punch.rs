//! Mutations of the clock-event store, as explicit command values.

use crate::db::store::ClockStore;
use crate::errors::{AppError, AppResult};
use crate::models::{
    day::Day,
    event::{ClockEvent, NewClockEvent},
    event_type::EventKind,
};
use crate::utils::time::to_local;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, SubsecRound};
use tracing::info;

#[derive(Debug, Clone)]
pub enum Mutation {
    /// Record a punch. Without an explicit kind it alternates Begin/End.
    Punch {
        at: DateTime<Local>,
        kind: Option<EventKind>,
    },
    /// Move an event to another time of its own day, optionally flipping
    /// its kind.
    EditEvent {
        id: i64,
        time: NaiveTime,
        kind: Option<EventKind>,
    },
    DeleteEvent {
        id: i64,
    },
    DeleteDay {
        date: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Punched(ClockEvent),
    Edited(ClockEvent),
    DeletedEvent(ClockEvent),
    DeletedDay(NaiveDate),
}

impl Mutation {
    /// Apply against `store`; `now` bounds punches and edits.
    pub fn apply<S: ClockStore + ?Sized>(
        &self,
        store: &S,
        now: DateTime<Local>,
    ) -> AppResult<MutationOutcome> {
        match self {
            Mutation::Punch { at, kind } => punch(store, *at, *kind, now),
            Mutation::EditEvent { id, time, kind } => edit_event(store, *id, *time, *kind, now),
            Mutation::DeleteEvent { id } => delete_event(store, *id),
            Mutation::DeleteDay { date } => delete_day(store, *date),
        }
    }
}

fn punch<S: ClockStore + ?Sized>(
    store: &S,
    at: DateTime<Local>,
    kind: Option<EventKind>,
    now: DateTime<Local>,
) -> AppResult<MutationOutcome> {
    let at = at.trunc_subsecs(0);
    if at > now {
        return Err(AppError::InvalidTime(format!(
            "cannot punch in the future ({})",
            at.format("%Y-%m-%d %H:%M:%S")
        )));
    }

    let date = at.date_naive();
    let day = match store.day_by_date(date)? {
        Some(d) => d,
        None => {
            info!(%date, "Creating day");
            store.upsert_day(&Day::new(date))?
        }
    };

    let existing = store.list_events_for_day(day.id)?;
    let kind = kind.unwrap_or_else(|| EventKind::next_for_count(existing.len()));

    let event = store.append_event(NewClockEvent::new(kind, at, day.id))?;

    store.append_log(
        "punch",
        &format!("event {}", event.id),
        &format!("{} at {}", kind.to_db_str(), event.get_date_time()),
    )?;

    Ok(MutationOutcome::Punched(event))
}

fn edit_event<S: ClockStore + ?Sized>(
    store: &S,
    id: i64,
    time: NaiveTime,
    kind: Option<EventKind>,
    now: DateTime<Local>,
) -> AppResult<MutationOutcome> {
    let original = store.event_by_id(id)?.ok_or(AppError::EventNotFound(id))?;

    let new_ts = to_local(original.timestamp.date_naive().and_time(time))?.trunc_subsecs(0);

    if new_ts > now {
        return Err(AppError::InvalidEdit("time is in the future".into()));
    }

    // chronologically previous event of the same day, as currently stored
    let events = store.list_events_for_day(original.day_id)?;
    let previous = events
        .iter()
        .position(|e| e.id == id)
        .and_then(|idx| idx.checked_sub(1))
        .map(|idx| &events[idx]);

    if let Some(prev) = previous
        && new_ts < prev.timestamp
    {
        return Err(AppError::InvalidEdit(format!(
            "time is before previous entry ({})",
            prev.time_str()
        )));
    }

    let edited = ClockEvent {
        kind: kind.unwrap_or(original.kind),
        timestamp: new_ts,
        ..original.clone()
    };
    store.update_event(&edited)?;

    store.append_log(
        "edit",
        &format!("event {id}"),
        &format!(
            "{} {} → {} {}",
            original.kind.to_db_str(),
            original.time_str(),
            edited.kind.to_db_str(),
            edited.time_str()
        ),
    )?;

    Ok(MutationOutcome::Edited(edited))
}

fn delete_event<S: ClockStore + ?Sized>(store: &S, id: i64) -> AppResult<MutationOutcome> {
    let event = store.event_by_id(id)?.ok_or(AppError::EventNotFound(id))?;
    store.delete_event(id)?;

    store.append_log(
        "del",
        &format!("event {id}"),
        &format!("{} at {}", event.kind.to_db_str(), event.get_date_time()),
    )?;

    Ok(MutationOutcome::DeletedEvent(event))
}

fn delete_day<S: ClockStore + ?Sized>(store: &S, date: NaiveDate) -> AppResult<MutationOutcome> {
    let day = store
        .day_by_date(date)?
        .ok_or_else(|| AppError::DayNotFound(date.to_string()))?;
    store.delete_day(day.id)?;

    store.append_log("del", &format!("day {date}"), "Deleted day and its events")?;

    Ok(MutationOutcome::DeletedDay(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::SqliteStore;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 5, 14)
                    .unwrap()
                    .and_hms_opt(h, m, 0)
                    .unwrap(),
            )
            .single()
            .unwrap()
    }

    fn punch_at(store: &SqliteStore, h: u32, m: u32) -> ClockEvent {
        match (Mutation::Punch {
            at: at(h, m),
            kind: None,
        })
        .apply(store, at(23, 0))
        .unwrap()
        {
            MutationOutcome::Punched(ev) => ev,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_punches_alternate_and_create_day_once() {
        let store = SqliteStore::in_memory().unwrap();
        let first = punch_at(&store, 8, 0);
        let second = punch_at(&store, 12, 0);
        let third = punch_at(&store, 12, 30);

        assert_eq!(first.kind, EventKind::Begin);
        assert_eq!(second.kind, EventKind::End);
        assert_eq!(third.kind, EventKind::Begin);
        assert_eq!(first.day_id, third.day_id);
        assert_eq!(store.list_days_ascending().unwrap().len(), 1);
        assert_eq!(store.list_log().unwrap().len(), 3);
    }

    #[test]
    fn test_punch_in_future_is_rejected() {
        let store = SqliteStore::in_memory().unwrap();
        let res = Mutation::Punch {
            at: at(18, 0),
            kind: None,
        }
        .apply(&store, at(17, 0));
        assert!(matches!(res, Err(AppError::InvalidTime(_))));
        assert!(store.list_days_ascending().unwrap().is_empty());
    }

    #[test]
    fn test_edit_moves_time_and_kind() {
        let store = SqliteStore::in_memory().unwrap();
        punch_at(&store, 8, 0);
        let end = punch_at(&store, 12, 0);

        let out = Mutation::EditEvent {
            id: end.id,
            time: NaiveTime::from_hms_opt(12, 45, 10).unwrap(),
            kind: None,
        }
        .apply(&store, at(23, 0))
        .unwrap();

        let MutationOutcome::Edited(ev) = out else {
            panic!("expected edit outcome");
        };
        assert_eq!(ev.time_str(), "12:45:10");
        assert_eq!(ev.kind, EventKind::End);
        assert_eq!(store.event_by_id(end.id).unwrap().unwrap(), ev);
    }

    #[test]
    fn test_edit_before_previous_is_rejected() {
        let store = SqliteStore::in_memory().unwrap();
        punch_at(&store, 8, 0);
        let end = punch_at(&store, 12, 0);

        let res = Mutation::EditEvent {
            id: end.id,
            time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            kind: None,
        }
        .apply(&store, at(23, 0));
        assert!(matches!(res, Err(AppError::InvalidEdit(_))));
    }

    #[test]
    fn test_edit_into_future_is_rejected() {
        let store = SqliteStore::in_memory().unwrap();
        let begin = punch_at(&store, 8, 0);

        let res = Mutation::EditEvent {
            id: begin.id,
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            kind: Some(EventKind::End),
        }
        .apply(&store, at(9, 0));
        assert!(matches!(res, Err(AppError::InvalidEdit(_))));
    }

    #[test]
    fn test_first_event_may_move_earlier() {
        let store = SqliteStore::in_memory().unwrap();
        let begin = punch_at(&store, 8, 0);

        Mutation::EditEvent {
            id: begin.id,
            time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            kind: None,
        }
        .apply(&store, at(23, 0))
        .unwrap();
    }

    #[test]
    fn test_delete_event_and_day() {
        let store = SqliteStore::in_memory().unwrap();
        let begin = punch_at(&store, 8, 0);
        punch_at(&store, 9, 0);

        Mutation::DeleteEvent { id: begin.id }
            .apply(&store, at(23, 0))
            .unwrap();
        assert_eq!(store.list_events_for_day(begin.day_id).unwrap().len(), 1);

        let date = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        Mutation::DeleteDay { date }
            .apply(&store, at(23, 0))
            .unwrap();
        assert!(store.day_by_date(date).unwrap().is_none());

        assert!(matches!(
            Mutation::DeleteDay { date }.apply(&store, at(23, 0)),
            Err(AppError::DayNotFound(_))
        ));
        assert!(matches!(
            Mutation::DeleteEvent { id: begin.id }.apply(&store, at(23, 0)),
            Err(AppError::EventNotFound(_))
        ));
    }
}
