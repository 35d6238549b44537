pub mod log;
pub mod migrate;
pub mod sqlite;
pub mod store;

pub use sqlite::SqliteStore;
pub use store::{ClockStore, LogEntry};
