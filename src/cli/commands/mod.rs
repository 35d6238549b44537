pub mod config;
pub mod del;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod overtime;
pub mod punch;
pub mod vacation;
pub mod watch;

use crate::config::Config;
use crate::core::calculator::overtime::OvertimeReport;
use crate::core::punch::{Mutation, MutationOutcome};
use crate::core::scheduler::{Recalculator, TriggerOutcome};
use crate::db::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::event_type::EventKind;
use crate::utils::runtime::single_thread_runtime;
use std::sync::Arc;

pub(crate) fn open_store(cfg: &Config) -> AppResult<Arc<SqliteStore>> {
    Ok(Arc::new(SqliteStore::open(&cfg.database)?))
}

pub(crate) fn recalculator(cfg: &Config) -> AppResult<Recalculator<SqliteStore>> {
    Ok(Recalculator::new(
        open_store(cfg)?,
        cfg.accounting(),
        cfg.refresh_interval_seconds,
    ))
}

/// Apply a mutation and recompute, under the single-writer gate.
pub(crate) fn submit(
    cfg: &Config,
    mutation: Mutation,
) -> AppResult<(MutationOutcome, OvertimeReport)> {
    let recalc = recalculator(cfg)?;
    single_thread_runtime()?.block_on(recalc.submit(mutation))
}

pub(crate) fn parse_kind(s: &str) -> AppResult<EventKind> {
    EventKind::from_input(s).ok_or_else(|| AppError::InvalidEventKind(s.to_string()))
}

/// Run one recompute pass and return its report.
pub(crate) fn recompute_now(cfg: &Config) -> AppResult<(Arc<SqliteStore>, OvertimeReport)> {
    let recalc = recalculator(cfg)?;
    let outcome = single_thread_runtime()?.block_on(recalc.trigger())?;

    match outcome {
        TriggerOutcome::Completed(report) => Ok((Arc::clone(recalc.store()), report)),
        TriggerOutcome::Coalesced => Err(AppError::Scheduler(
            "a recompute pass is already running".into(),
        )),
    }
}
