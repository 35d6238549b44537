pub mod colors;
pub mod date;
pub mod duration;
pub mod formatting;
pub mod logging;
pub mod runtime;
pub mod table;
pub mod time;
