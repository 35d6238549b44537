use crate::errors::AppResult;

/// Runtime for CLI commands: one thread plus the blocking pool used for
/// store work.
pub fn single_thread_runtime() -> AppResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
