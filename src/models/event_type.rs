use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventKind {
    Begin,
    End,
}

impl EventKind {
    /// Parse user input ("begin", "in", "END", ...).
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "begin" | "in" | "b" => Some(Self::Begin),
            "end" | "out" | "e" => Some(Self::End),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::Begin => "Begin",
            EventKind::End => "End",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Begin" => Some(EventKind::Begin),
            "End" => Some(EventKind::End),
            _ => None,
        }
    }

    /// Kind of the next punch on a day that already holds `count` events.
    pub fn next_for_count(count: usize) -> Self {
        if count % 2 == 0 {
            EventKind::Begin
        } else {
            EventKind::End
        }
    }

    pub fn is_begin(&self) -> bool {
        matches!(self, EventKind::Begin)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, EventKind::End)
    }
}
