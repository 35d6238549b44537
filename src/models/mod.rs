pub mod day;
pub mod day_totals;
pub mod event;
pub mod event_type;
pub mod vacation;
