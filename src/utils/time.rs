//! Time utilities: parsing `HH:MM[:SS]`, full timestamps, local-time resolution.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, NaiveTime, TimeZone};

pub fn parse_time(t: &str) -> AppResult<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .map_err(|_| AppError::InvalidTime(t.to_string()))
}

/// `YYYY-MM-DD HH:MM[:SS]`, a `T` separator is accepted too.
pub fn parse_date_time(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

/// Resolve a wall-clock time in the local zone. On a DST fold the earlier
/// instant wins; times inside a DST gap are rejected.
pub fn to_local(ndt: NaiveDateTime) -> AppResult<DateTime<Local>> {
    match Local.from_local_datetime(&ndt) {
        LocalResult::Single(t) => Ok(t),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(AppError::InvalidTime(format!(
            "{ndt} does not exist in the local time zone"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_with_and_without_seconds() {
        assert_eq!(
            parse_time("08:05").unwrap(),
            NaiveTime::from_hms_opt(8, 5, 0).unwrap()
        );
        assert_eq!(
            parse_time(" 17:30:12 ").unwrap(),
            NaiveTime::from_hms_opt(17, 30, 12).unwrap()
        );
        assert!(matches!(parse_time("25:00"), Err(AppError::InvalidTime(_))));
        assert!(parse_time("8h").is_err());
    }

    #[test]
    fn test_parse_date_time_formats() {
        let a = parse_date_time("2024-05-14 08:00").unwrap();
        let b = parse_date_time("2024-05-14T08:00:00").unwrap();
        assert_eq!(a, b);
        assert!(parse_date_time("14/05/2024 08:00").is_err());
    }
}
