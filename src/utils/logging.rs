use crate::errors::{AppError, AppResult};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr so stdout stays clean
/// for command output (`--json` in particular).
///
/// Without `-v` the level comes from `RUST_LOG`, defaulting to warnings.
pub fn enable_logging(verbosity: u8) -> AppResult<()> {
    let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");

    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{crate_name}=warn"))),
        1 => EnvFilter::new(format!("{crate_name}=info")),
        2 => EnvFilter::new(format!("{crate_name}=debug")),
        _ => EnvFilter::new(format!("{crate_name}=trace")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Other(format!("logging already initialised: {e}")))
}
