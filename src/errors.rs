//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// A batch write failed as a whole; nothing of the batch was kept.
    #[error("Store failure: {0}")]
    Store(String),

    #[error("Corrupt stored value: {0}")]
    DataCorruption(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid event kind: {0}")]
    InvalidEventKind(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("No event with id {0}")]
    EventNotFound(i64),

    #[error("No day found for {0}")]
    DayNotFound(String),

    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    #[error("Invalid vacation: {0}")]
    InvalidVacation(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Background recomputation
    // ---------------------------
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Other(format!("JSON serialization failed: {e}"))
    }
}

pub type AppResult<T> = Result<T, AppError>;
