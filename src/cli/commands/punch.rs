use super::{parse_kind, submit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::punch::{Mutation, MutationOutcome};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::time::{parse_date_time, to_local};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch { at, kind } = cmd {
        let at = match at {
            Some(s) => to_local(parse_date_time(s)?)?,
            None => Local::now(),
        };
        let kind = kind.as_deref().map(parse_kind).transpose()?;

        let (outcome, report) = submit(cfg, Mutation::Punch { at, kind })?;

        if let MutationOutcome::Punched(ev) = outcome {
            success(format!(
                "{} #{} recorded at {}",
                ev.kind.to_db_str(),
                ev.id,
                ev.get_date_time()
            ));
        }
        info(format!("Overtime balance: {}", report.total_display()));
    }

    Ok(())
}
