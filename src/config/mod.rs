use crate::core::calculator::AccountingConfig;
use crate::core::calculator::breaks::BreakPolicy;
use crate::core::scheduler::MIN_REFRESH_SECONDS;
use crate::errors::{AppError, AppResult};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the configuration directory (used by the test-suite).
pub const CONFIG_DIR_ENV: &str = "PUNCHCLOCK_CONFIG_DIR";

pub const MAX_WEEKLY_HOURS: u32 = 168;
/// Upper bound for the imported and carried-forward balances, in hours.
pub const MAX_BALANCE_HOURS: i64 = 100_000;
const DEFAULT_WEEKLY_HOURS: i64 = 40;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Signed on disk so that a hand-edited negative value can be corrected.
    #[serde(default = "default_weekly_target_hours")]
    pub weekly_target_hours: i64,
    #[serde(default)]
    pub imported_overtime_hours: f64,
    #[serde(default)]
    pub import_locked: bool,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    #[serde(default)]
    pub break_policy: BreakPolicy,
    #[serde(default)]
    pub carried_forward_minutes: i64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_weekly_target_hours() -> i64 {
    DEFAULT_WEEKLY_HOURS
}
fn default_refresh_interval() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            weekly_target_hours: default_weekly_target_hours(),
            imported_overtime_hours: 0.0,
            import_locked: false,
            refresh_interval_seconds: default_refresh_interval(),
            break_policy: BreakPolicy::default(),
            carried_forward_minutes: 0,
        }
    }
}

impl Config {
    /// `$PUNCHCLOCK_CONFIG_DIR`, else `~/.punchclock`.
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV)
            && !dir.trim().is_empty()
        {
            return PathBuf::from(dir);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".punchclock")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("punchclock.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("punchclock.sqlite")
    }

    /// Load the configuration file, falling back to defaults when absent.
    /// The returned value is always sanitized.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let mut cfg = if path.exists() {
            let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Config::default()
        };

        cfg.sanitize();
        Ok(cfg)
    }

    /// Correct out-of-range values, warning about each change.
    pub fn sanitize(&mut self) {
        if self.weekly_target_hours <= 0 {
            warn!(
                value = self.weekly_target_hours,
                "weekly_target_hours must be positive, using {DEFAULT_WEEKLY_HOURS}"
            );
            self.weekly_target_hours = DEFAULT_WEEKLY_HOURS;
        } else if self.weekly_target_hours > MAX_WEEKLY_HOURS as i64 {
            warn!(
                value = self.weekly_target_hours,
                "weekly_target_hours above {MAX_WEEKLY_HOURS}, clamping"
            );
            self.weekly_target_hours = MAX_WEEKLY_HOURS as i64;
        }

        if !self.imported_overtime_hours.is_finite() || self.imported_overtime_hours < 0.0 {
            warn!(
                value = self.imported_overtime_hours,
                "imported_overtime_hours must not be negative, using 0"
            );
            self.imported_overtime_hours = 0.0;
        } else if self.imported_overtime_hours > MAX_BALANCE_HOURS as f64 {
            warn!(
                value = self.imported_overtime_hours,
                "imported_overtime_hours above {MAX_BALANCE_HOURS}, clamping"
            );
            self.imported_overtime_hours = MAX_BALANCE_HOURS as f64;
        }

        let max_minutes = MAX_BALANCE_HOURS * 60;
        if self.carried_forward_minutes.unsigned_abs() > max_minutes.unsigned_abs() {
            warn!(
                value = self.carried_forward_minutes,
                "carried_forward_minutes beyond {max_minutes}, clamping"
            );
            self.carried_forward_minutes = self
                .carried_forward_minutes
                .clamp(-max_minutes, max_minutes);
        }

        if self.refresh_interval_seconds < MIN_REFRESH_SECONDS {
            warn!(
                value = self.refresh_interval_seconds,
                "refresh_interval_seconds below {MIN_REFRESH_SECONDS}, clamping"
            );
            self.refresh_interval_seconds = MIN_REFRESH_SECONDS;
        }
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|_| AppError::ConfigSave)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Create the configuration directory and file.
    ///
    /// A relative `custom_db` is placed inside the configuration directory.
    /// An existing configuration keeps its settings; only the database path
    /// is replaced when one is given.
    pub fn init_all(custom_db: Option<&str>) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut cfg = Self::load()?;

        if let Some(name) = custom_db {
            let p = Path::new(name);
            let db_path = if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            };
            cfg.database = db_path.to_string_lossy().to_string();
        }

        cfg.save()?;
        Ok(cfg)
    }

    /// Values handed to the accounting engine.
    pub fn accounting(&self) -> AccountingConfig {
        AccountingConfig {
            weekly_target_hours: self
                .weekly_target_hours
                .clamp(1, MAX_WEEKLY_HOURS as i64) as u32,
            imported_overtime_hours: self.imported_overtime_hours,
            import_locked: self.import_locked,
            break_policy: self.break_policy,
            carried_forward: Duration::try_minutes(self.carried_forward_minutes)
                .unwrap_or_else(Duration::zero),
        }
    }
}
