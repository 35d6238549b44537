use super::recompute_now;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::ClockStore;
use crate::errors::AppResult;
use crate::models::{day::Day, event::ClockEvent};
use crate::utils::colors::{colour_for_kind, colour_for_overtime};
use crate::utils::date;
use crate::utils::duration::{format_signed, parse_duration};
use crate::utils::table::{Cell, Table};
use serde::Serialize;

#[derive(Serialize)]
struct DayListing {
    #[serde(flatten)]
    day: Day,
    events: Vec<ClockEvent>,
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, json } = cmd {
        let bounds = period.as_deref().map(date::period_bounds).transpose()?;

        let (store, _) = recompute_now(cfg)?;

        let mut listing = Vec::new();
        for day in store.list_days_descending()? {
            if let Some((from, to)) = bounds
                && (day.date < from || day.date > to)
            {
                continue;
            }
            let events = store.list_events_for_day(day.id)?;
            listing.push(DayListing { day, events });
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&listing)?);
            return Ok(());
        }

        if listing.is_empty() {
            println!("No days recorded.");
            return Ok(());
        }

        print_table(&listing);
    }
    Ok(())
}

fn print_table(listing: &[DayListing]) {
    let mut table = Table::new(["Date", "Break", "Work", "Overtime"]);

    for entry in listing {
        let day = &entry.day;

        // stored text that does not parse is shown as-is
        let (overtime, colour) = match parse_duration(&day.overtime) {
            Ok(d) => (format_signed(d), colour_for_overtime(d)),
            Err(_) => (day.overtime.clone(), None),
        };

        table.add_row(vec![
            Cell::plain(day.date_str()),
            Cell::plain(day.break_duration.clone()),
            Cell::plain(day.work_duration.clone()),
            Cell::coloured(overtime, colour),
        ]);
    }

    print!("{}", table.render());
    println!();

    for entry in listing {
        println!("{}", entry.day.date_str());
        if entry.events.is_empty() {
            println!("   (no punches)");
        }
        for ev in &entry.events {
            println!(
                "   #{:<5} {} {}",
                ev.id,
                colour_for_kind(ev.kind).paint(format!("{:<5}", ev.kind.to_db_str())),
                ev.time_str()
            );
        }
    }
}
