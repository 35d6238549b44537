use crate::cli::parser::Commands;
use crate::config::{Config, MAX_BALANCE_HOURS, MAX_WEEKLY_HOURS};
use crate::core::calculator::breaks::BreakPolicy;
use crate::core::scheduler::MIN_REFRESH_SECONDS;
use crate::db::{ClockStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        set_weekly,
        set_import,
        lock_import,
        unlock_import,
        set_refresh,
        set_break_policy,
        set_carried,
    } = cmd
    {
        let mut updated = cfg.clone();
        let mut changes: Vec<String> = Vec::new();

        if let Some(h) = set_weekly {
            if !(1..=MAX_WEEKLY_HOURS as i64).contains(h) {
                return Err(AppError::Config(format!(
                    "weekly hours must be between 1 and {MAX_WEEKLY_HOURS}, got {h}"
                )));
            }
            updated.weekly_target_hours = *h;
            changes.push(format!("weekly_target_hours = {h}"));
        }

        if *unlock_import {
            updated.import_locked = false;
            changes.push("import_locked = false".into());
        }

        if let Some(h) = set_import {
            if updated.import_locked {
                return Err(AppError::Config(
                    "imported overtime is locked (use --unlock-import first)".into(),
                ));
            }
            if !h.is_finite() || *h < 0.0 || *h > MAX_BALANCE_HOURS as f64 {
                return Err(AppError::Config(format!(
                    "imported overtime must be between 0 and {MAX_BALANCE_HOURS} hours, got {h}"
                )));
            }
            updated.imported_overtime_hours = *h;
            changes.push(format!("imported_overtime_hours = {h}"));
        }

        if *lock_import {
            updated.import_locked = true;
            changes.push("import_locked = true".into());
        }

        if let Some(s) = set_refresh {
            if *s < MIN_REFRESH_SECONDS {
                warning(format!(
                    "Refresh interval below {MIN_REFRESH_SECONDS}s, using {MIN_REFRESH_SECONDS}s"
                ));
            }
            updated.refresh_interval_seconds = (*s).max(MIN_REFRESH_SECONDS);
            changes.push(format!(
                "refresh_interval_seconds = {}",
                updated.refresh_interval_seconds
            ));
        }

        if let Some(p) = set_break_policy {
            let policy = BreakPolicy::from_input(p)
                .ok_or_else(|| AppError::Config(format!("unknown break policy: {p}")))?;
            updated.break_policy = policy;
            changes.push(format!("break_policy = {}", policy.as_str()));
        }

        if let Some(m) = set_carried {
            let max = MAX_BALANCE_HOURS * 60;
            if !(-max..=max).contains(m) {
                return Err(AppError::Config(format!(
                    "carried-forward minutes must be between -{max} and {max}, got {m}"
                )));
            }
            updated.carried_forward_minutes = *m;
            changes.push(format!("carried_forward_minutes = {m}"));
        }

        if !changes.is_empty() {
            updated.save()?;

            // config changes are audited next to the data they affect
            if let Ok(store) = SqliteStore::open(&updated.database) {
                for c in &changes {
                    store.append_log("config", "config", c)?;
                }
            }

            for c in &changes {
                success(format!("Set {c}"));
            }
        }

        if *print_config {
            println!("📄 Current configuration:\n");
            println!(
                "{}",
                serde_yaml::to_string(&updated).map_err(|e| AppError::Config(e.to_string()))?
            );
        }
    }

    Ok(())
}
