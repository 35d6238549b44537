use super::submit;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::punch::{Mutation, MutationOutcome};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::date;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { event, date, yes } = cmd {
        let mutation = match (event, date) {
            (Some(id), _) => Mutation::DeleteEvent { id: *id },
            (None, Some(d)) => Mutation::DeleteDay {
                date: date::parse_date(d)?,
            },
            // clap requires one of the two
            (None, None) => return Ok(()),
        };

        let prompt = match &mutation {
            Mutation::DeleteDay { date } => {
                format!("Delete {date} and ALL its punches? This action is irreversible.")
            }
            Mutation::DeleteEvent { id } => format!("Delete event #{id}?"),
            _ => String::new(),
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let (outcome, report) = submit(cfg, mutation)?;

        match outcome {
            MutationOutcome::DeletedEvent(ev) => success(format!(
                "Event #{} ({} at {}) has been deleted.",
                ev.id,
                ev.kind.to_db_str(),
                ev.get_date_time()
            )),
            MutationOutcome::DeletedDay(d) => {
                success(format!("{d} and its punches have been deleted."))
            }
            _ => {}
        }
        info(format!("Overtime balance: {}", report.total_display()));
    }

    Ok(())
}
