use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for punchclock
/// Clock in and out, and keep a running overtime balance in SQLite
#[derive(Parser)]
#[command(
    name = "punchclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A punch clock CLI: record Begin/End punches and track breaks and overtime using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Diagnostic output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(global = true, short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Record a Begin/End punch (kind alternates unless given)
    Punch {
        #[arg(
            long = "at",
            help = "Punch time as \"YYYY-MM-DD HH:MM[:SS]\" (default: now)"
        )]
        at: Option<String>,

        #[arg(long = "kind", help = "Force the event kind: begin|end")]
        kind: Option<String>,
    },

    /// Correct the time (and optionally the kind) of a recorded punch
    Edit {
        /// Event ID (see `list`)
        id: i64,

        #[arg(long = "time", help = "New time of day (HH:MM[:SS])")]
        time: String,

        #[arg(long = "kind", help = "New event kind: begin|end")]
        kind: Option<String>,
    },

    /// Delete a single punch or a whole day
    #[command(group(ArgGroup::new("target").required(true).args(["event", "date"])))]
    Del {
        #[arg(long = "event", help = "Event ID to delete")]
        event: Option<i64>,

        #[arg(long = "date", help = "Delete the whole day (YYYY-MM-DD) and its punches")]
        date: Option<String>,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List days with their punches, break, work and overtime
    List {
        #[arg(
            long = "period",
            help = "Filter by period: YYYY, YYYY-MM or YYYY-MM-DD (default: all)"
        )]
        period: Option<String>,

        #[arg(long = "json", help = "Print days as JSON")]
        json: bool,
    },

    /// Recompute all days and print the overtime balance
    Overtime {
        #[arg(long = "json", help = "Print the report as JSON")]
        json: bool,
    },

    /// Keep recomputing in the foreground until Ctrl-C
    Watch {
        #[arg(
            long = "interval",
            help = "Seconds between passes (default: refresh_interval_seconds, min 15)"
        )]
        interval: Option<u64>,
    },

    /// Manage vacation date ranges
    Vacation {
        #[command(subcommand)]
        action: VacationAction,
    },

    /// View or change the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "set-weekly", help = "Contracted hours per week (1-168)")]
        set_weekly: Option<i64>,

        #[arg(
            long = "set-import",
            help = "Legacy overtime balance in hours (refused while locked)"
        )]
        set_import: Option<f64>,

        #[arg(long = "lock-import", help = "Lock the imported balance")]
        lock_import: bool,

        #[arg(
            long = "unlock-import",
            conflicts_with = "lock_import",
            help = "Unlock the imported balance"
        )]
        unlock_import: bool,

        #[arg(long = "set-refresh", help = "Seconds between background passes (min 15)")]
        set_refresh: Option<u64>,

        #[arg(
            long = "set-break-policy",
            help = "Break inference: tiered | gap-override"
        )]
        set_break_policy: Option<String>,

        #[arg(
            long = "set-carried",
            allow_negative_numbers = true,
            help = "Carried-forward overtime seed in minutes (may be negative)"
        )]
        set_carried: Option<i64>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum VacationAction {
    /// Add a vacation range (inclusive)
    Add {
        /// First day (YYYY-MM-DD)
        start: String,
        /// Last day (YYYY-MM-DD)
        end: String,
    },

    /// List vacations, most recent first
    List {
        #[arg(long = "json", help = "Print vacations as JSON")]
        json: bool,
    },

    /// Change the range of a vacation
    Edit {
        id: i64,
        start: String,
        end: String,
    },

    /// Delete a vacation
    Del { id: i64 },
}
