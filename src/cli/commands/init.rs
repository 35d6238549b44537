use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::{ClockStore, SqliteStore};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// Creates the configuration directory and file, then opens the database,
/// which applies the schema and any pending migrations.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref())?;

    println!("⚙️  Initializing punchclock…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", cfg.database);

    let store = SqliteStore::open(&cfg.database)?;

    if let Err(e) = store.append_log(
        "init",
        "database",
        &format!("Database initialized at {}", cfg.database),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    success("punchclock initialization completed!");
    Ok(())
}
