use crate::db::store::ClockStore;
use crate::errors::{AppError, AppResult};
use crate::models::vacation::Vacation;
use chrono::NaiveDate;

pub struct VacationLogic;

impl VacationLogic {
    pub fn add<S: ClockStore + ?Sized>(
        store: &S,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vacation> {
        check_range(start, end)?;
        let v = store.add_vacation(start, end)?;
        store.append_log(
            "vacation",
            &format!("vacation {}", v.id),
            &format!("Added {} → {} ({} days)", v.start, v.end, v.days()),
        )?;
        Ok(v)
    }

    pub fn edit<S: ClockStore + ?Sized>(
        store: &S,
        id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vacation> {
        check_range(start, end)?;
        let v = Vacation { id, start, end };
        store.update_vacation(&v)?;
        store.append_log(
            "vacation",
            &format!("vacation {id}"),
            &format!("Changed to {start} → {end}"),
        )?;
        Ok(v)
    }

    pub fn delete<S: ClockStore + ?Sized>(store: &S, id: i64) -> AppResult<Vacation> {
        let v = store
            .list_vacations()?
            .into_iter()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::InvalidVacation(format!("no vacation with id {id}")))?;

        store.delete_vacation(id)?;
        store.append_log(
            "vacation",
            &format!("vacation {id}"),
            &format!("Deleted {} → {}", v.start, v.end),
        )?;
        Ok(v)
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if start > end {
        return Err(AppError::InvalidVacation(format!(
            "start {start} is after end {end}"
        )));
    }
    Ok(())
}
