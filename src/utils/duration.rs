//! Text form of durations at the persistence boundary.
//!
//! Components are written largest first (`8h15m`, `45m`, `1h0m5s`) with
//! trailing zero components stripped, zero is `0s`. The parser also takes the
//! unstripped legacy form (`45m0s`, `4h0m0s`) and a bare `0`.

use crate::errors::{AppError, AppResult};
use chrono::Duration;

pub const ZERO_DURATION: &str = "0s";

pub fn format_duration(d: Duration) -> String {
    let total = d.num_seconds();
    if total == 0 {
        return ZERO_DURATION.to_string();
    }

    let abs = total.unsigned_abs();
    let (h, m, s) = (abs / 3600, (abs % 3600) / 60, abs % 60);

    let mut out = String::new();
    if total < 0 {
        out.push('-');
    }
    if h > 0 {
        out.push_str(&format!("{h}h"));
    }
    if m > 0 || (h > 0 && s > 0) {
        out.push_str(&format!("{m}m"));
    }
    if s > 0 {
        out.push_str(&format!("{s}s"));
    }
    out
}

/// Like [`format_duration`] but positive values carry an explicit `+`.
pub fn format_signed(d: Duration) -> String {
    if d > Duration::zero() {
        format!("+{}", format_duration(d))
    } else {
        format_duration(d)
    }
}

pub fn parse_duration(raw: &str) -> AppResult<Duration> {
    let corrupt = || AppError::DataCorruption(format!("unparsable duration '{raw}'"));

    let s = raw.trim();
    if s == "0" {
        return Ok(Duration::zero());
    }

    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if body.is_empty() {
        return Err(corrupt());
    }

    // h, m, s: each at most once, in that order
    let mut last_rank = 0u8;
    let mut seconds: i64 = 0;
    let mut digits = String::new();

    for c in body.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let (rank, factor) = match c {
            'h' => (1, 3600),
            'm' => (2, 60),
            's' => (3, 1),
            _ => return Err(corrupt()),
        };
        if digits.is_empty() || rank <= last_rank {
            return Err(corrupt());
        }

        let value: i64 = digits.parse().map_err(|_| corrupt())?;
        seconds = value
            .checked_mul(factor)
            .and_then(|v| seconds.checked_add(v))
            .ok_or_else(corrupt)?;

        last_rank = rank;
        digits.clear();
    }

    if !digits.is_empty() {
        return Err(corrupt());
    }

    let seconds = if negative { -seconds } else { seconds };
    Duration::try_seconds(seconds).ok_or_else(corrupt)
}

/// Convert a fractional hour count (config input) to whole seconds, once.
///
/// `None` when the value is not finite or does not fit a `Duration`.
pub fn from_hours(hours: f64) -> Option<Duration> {
    let seconds = (hours * 3600.0).round();
    if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_seconds(seconds as i64)
}
