use super::{parse_kind, submit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::punch::{Mutation, MutationOutcome};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::parse_time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id, time, kind } = cmd {
        let time = parse_time(time)?;
        let kind = kind.as_deref().map(parse_kind).transpose()?;

        let (outcome, report) = submit(
            cfg,
            Mutation::EditEvent {
                id: *id,
                time,
                kind,
            },
        )?;

        if let MutationOutcome::Edited(ev) = outcome {
            success(format!(
                "Event #{} is now {} at {}",
                ev.id,
                ev.kind.to_db_str(),
                ev.get_date_time()
            ));
        }
        info(format!("Overtime balance: {}", report.total_display()));
    }

    Ok(())
}
