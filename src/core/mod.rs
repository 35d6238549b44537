pub mod calculator;
pub mod logic;
pub mod punch;
pub mod recompute;
pub mod scheduler;
pub mod vacation;
