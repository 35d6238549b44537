use super::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::ClockStore;
use crate::errors::AppResult;
use crate::utils::colors::colour_for_operation;
use crate::utils::formatting::truncate;

const TARGET_WIDTH: usize = 40;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let store = open_store(cfg)?;
        let entries = store.list_log()?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for e in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone());

            let target = if e.target.is_empty() {
                String::new()
            } else {
                truncate(&format!("({})", e.target), TARGET_WIDTH)
            };

            // pad on plain text, colour only the operation word
            let op_plain = format!("{:<18}", e.operation);
            println!(
                "{:>id_w$}: {:<25} | {} {:<w$} => {}",
                e.id,
                date,
                colour_for_operation(&e.operation).paint(op_plain),
                target,
                e.message,
                w = TARGET_WIDTH
            );
        }
    }

    Ok(())
}
