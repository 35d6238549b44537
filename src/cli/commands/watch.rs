use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scheduler::{Recalculator, detect_shutdown};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{colour_for_overtime, paint};
use crate::utils::runtime::single_thread_runtime;
use chrono::Local;
use tokio_util::sync::CancellationToken;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { interval } = cmd {
        let secs = interval.unwrap_or(cfg.refresh_interval_seconds);
        let recalc = Recalculator::new(open_store(cfg)?, cfg.accounting(), secs);

        info(format!(
            "Recomputing every {}s, press Ctrl-C to stop",
            recalc.refresh_interval().as_secs()
        ));

        let token = CancellationToken::new();

        let (_, result) = single_thread_runtime()?.block_on(async {
            tokio::join!(
                detect_shutdown(token.clone()),
                recalc.run(token.clone(), |report| {
                    println!(
                        "[{}] balance {} over {} days",
                        Local::now().format("%H:%M:%S"),
                        paint(&report.total_display(), colour_for_overtime(report.total)),
                        report.days.len()
                    );
                }),
            )
        });
        result?;

        success("Stopped.");
    }
    Ok(())
}
