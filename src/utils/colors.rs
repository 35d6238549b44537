//! Terminal colours for command output.

use crate::models::event_type::EventKind;
use ansi_term::Colour;
use chrono::Duration;

/// Overtime colour:
/// \>0 → green
/// \<0 → red
/// 0 → none
pub fn colour_for_overtime(d: Duration) -> Option<Colour> {
    if d > Duration::zero() {
        Some(Colour::Green)
    } else if d < Duration::zero() {
        Some(Colour::Red)
    } else {
        None
    }
}

pub fn colour_for_kind(kind: EventKind) -> Colour {
    match kind {
        EventKind::Begin => Colour::Green,
        EventKind::End => Colour::Red,
    }
}

/// Audit-log operation colour.
pub fn colour_for_operation(op: &str) -> Colour {
    match op {
        "punch" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "vacation" => Colour::Cyan,
        "config" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn paint(text: &str, colour: Option<Colour>) -> String {
    match colour {
        Some(c) => c.paint(text).to_string(),
        None => text.to_string(),
    }
}
