use super::open_store;
use crate::cli::parser::{Commands, VacationAction};
use crate::config::Config;
use crate::core::vacation::VacationLogic;
use crate::db::ClockStore;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::table::{Cell, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Vacation { action } = cmd {
        let store = open_store(cfg)?;

        match action {
            VacationAction::Add { start, end } => {
                let v = VacationLogic::add(
                    store.as_ref(),
                    date::parse_date(start)?,
                    date::parse_date(end)?,
                )?;
                success(format!(
                    "Vacation #{} added: {} → {} ({} days)",
                    v.id,
                    v.start,
                    v.end,
                    v.days()
                ));
            }

            VacationAction::List { json } => {
                let vacations = store.list_vacations()?;

                if *json {
                    println!("{}", serde_json::to_string_pretty(&vacations)?);
                } else if vacations.is_empty() {
                    println!("No vacations recorded.");
                } else {
                    let mut table = Table::new(["ID", "Start", "End", "Days"]);
                    for v in &vacations {
                        table.add_row(vec![
                            Cell::plain(v.id.to_string()),
                            Cell::plain(v.start.to_string()),
                            Cell::plain(v.end.to_string()),
                            Cell::plain(v.days().to_string()),
                        ]);
                    }
                    print!("{}", table.render());
                }
            }

            VacationAction::Edit { id, start, end } => {
                let v = VacationLogic::edit(
                    store.as_ref(),
                    *id,
                    date::parse_date(start)?,
                    date::parse_date(end)?,
                )?;
                success(format!("Vacation #{} is now {} → {}", v.id, v.start, v.end));
            }

            VacationAction::Del { id } => {
                let v = VacationLogic::delete(store.as_ref(), *id)?;
                success(format!(
                    "Vacation #{} ({} → {}) deleted.",
                    v.id, v.start, v.end
                ));
            }
        }
    }
    Ok(())
}
