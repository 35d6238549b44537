use super::recompute_now;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::overtime::OvertimeReport;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{colour_for_overtime, paint};
use crate::utils::duration::{format_duration, format_signed};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
struct DayJson {
    date: NaiveDate,
    overtime: String,
    overtime_seconds: i64,
}

#[derive(Serialize)]
struct ReportJson {
    daily_target: String,
    days: Vec<DayJson>,
    skipped: Vec<NaiveDate>,
    days_total_seconds: i64,
    total: String,
    total_seconds: i64,
}

impl From<&OvertimeReport> for ReportJson {
    fn from(r: &OvertimeReport) -> Self {
        Self {
            daily_target: format_duration(r.daily_target),
            days: r
                .days
                .iter()
                .map(|d| DayJson {
                    date: d.date,
                    overtime: format_duration(d.delta),
                    overtime_seconds: d.delta.num_seconds(),
                })
                .collect(),
            skipped: r.skipped.clone(),
            days_total_seconds: r.days_total.num_seconds(),
            total: r.total_display(),
            total_seconds: r.total.num_seconds(),
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Overtime { json } = cmd {
        let (_, report) = recompute_now(cfg)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&ReportJson::from(&report))?);
            return Ok(());
        }

        let acc = cfg.accounting();

        header("Overtime");
        println!(
            "Weekly target   : {}h ({} per day)",
            acc.weekly_target_hours,
            format_duration(report.daily_target)
        );
        println!("Days counted    : {}", report.days.len());
        println!("From days       : {}", format_signed(report.days_total));
        println!("Carried forward : {}", format_signed(acc.carried_forward));
        println!(
            "Imported        : {}h{}",
            acc.imported_overtime_hours,
            if acc.import_locked { " (locked)" } else { "" }
        );
        println!(
            "Balance         : {}",
            paint(&report.total_display(), colour_for_overtime(report.total))
        );

        for d in &report.skipped {
            warning(format!("{d}: stored work duration is corrupt, counted as zero"));
        }
    }
    Ok(())
}
