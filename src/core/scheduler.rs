//! Background recalculation: periodic passes plus mutation-driven ones.
//!
//! A single gate serializes every pass and every mutation. Triggers that
//! find the gate taken are dropped; mutations wait for it.

use crate::core::calculator::AccountingConfig;
use crate::core::calculator::overtime::OvertimeReport;
use crate::core::punch::{Mutation, MutationOutcome};
use crate::core::recompute::recompute;
use crate::db::store::ClockStore;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub const MIN_REFRESH_SECONDS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Completed(OvertimeReport),
    /// Another pass held the gate; nothing was run.
    Coalesced,
}

pub struct Recalculator<S: ClockStore + 'static> {
    store: Arc<S>,
    accounting: AccountingConfig,
    gate: Arc<AsyncMutex<()>>,
    last: Arc<Mutex<Option<OvertimeReport>>>,
    refresh: Duration,
}

impl<S: ClockStore + 'static> Clone for Recalculator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            accounting: self.accounting.clone(),
            gate: Arc::clone(&self.gate),
            last: Arc::clone(&self.last),
            refresh: self.refresh,
        }
    }
}

impl<S: ClockStore + 'static> Recalculator<S> {
    /// `refresh_seconds` below the minimum is raised to it.
    pub fn new(store: Arc<S>, accounting: AccountingConfig, refresh_seconds: u64) -> Self {
        Self {
            store,
            accounting,
            gate: Arc::new(AsyncMutex::new(())),
            last: Arc::new(Mutex::new(None)),
            refresh: Duration::from_secs(refresh_seconds.max(MIN_REFRESH_SECONDS)),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Report of the most recent successful pass, if any.
    pub fn last_report(&self) -> Option<OvertimeReport> {
        self.last.lock().ok().and_then(|slot| slot.clone())
    }

    /// Run one pass unless one is already in flight.
    pub async fn trigger(&self) -> AppResult<TriggerOutcome> {
        let guard = match Arc::clone(&self.gate).try_lock_owned() {
            Ok(g) => g,
            Err(_) => {
                debug!("Recompute already in flight, trigger coalesced");
                return Ok(TriggerOutcome::Coalesced);
            }
        };

        let report = self.spawn_pass(guard, None).await?.1;
        Ok(TriggerOutcome::Completed(report))
    }

    /// Apply a mutation, then recompute, both under the gate.
    ///
    /// Unlike [`trigger`](Self::trigger) this waits for a running pass.
    pub async fn submit(&self, mutation: Mutation) -> AppResult<(MutationOutcome, OvertimeReport)> {
        let guard = Arc::clone(&self.gate).lock_owned().await;
        let (outcome, report) = self.spawn_pass(guard, Some(mutation)).await?;

        match outcome {
            Some(o) => Ok((o, report)),
            None => Err(AppError::Scheduler("mutation produced no outcome".into())),
        }
    }

    /// The guard moves into the blocking task, so a pass runs to completion
    /// even if the awaiting future is dropped.
    async fn spawn_pass(
        &self,
        guard: OwnedMutexGuard<()>,
        mutation: Option<Mutation>,
    ) -> AppResult<(Option<MutationOutcome>, OvertimeReport)> {
        let store = Arc::clone(&self.store);
        let cfg = self.accounting.clone();
        let last = Arc::clone(&self.last);

        let handle = tokio::task::spawn_blocking(move || {
            let _gate = guard;

            let outcome = match mutation {
                Some(m) => Some(m.apply(store.as_ref(), Local::now())?),
                None => None,
            };

            let report = recompute(store.as_ref(), &cfg)?;

            if let Ok(mut slot) = last.lock() {
                *slot = Some(report.clone());
            }

            Ok::<_, AppError>((outcome, report))
        });

        handle
            .await
            .map_err(|e| AppError::Scheduler(format!("recompute task failed: {e}")))?
    }

    /// Periodic loop. Returns once `token` is cancelled; a pass already
    /// started is finished first.
    pub async fn run<F>(&self, token: CancellationToken, mut on_report: F) -> AppResult<()>
    where
        F: FnMut(&OvertimeReport),
    {
        let mut ticker = tokio::time::interval(self.refresh);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.refresh.as_secs(), "Recalculation loop started");

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("Recalculation loop stopped");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    match self.trigger().await {
                        Ok(TriggerOutcome::Completed(report)) => on_report(&report),
                        Ok(TriggerOutcome::Coalesced) => {}
                        Err(e) => error!("Periodic recompute failed: {e}"),
                    }
                }
            }
        }
    }
}

/// Cancel `token` on Ctrl-C. Returns early if the token is cancelled
/// elsewhere.
pub async fn detect_shutdown(token: CancellationToken) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
            token.cancel();
        },
        _ = token.cancelled() => {}
    };
}
