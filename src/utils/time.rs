//! Time utilities: parsing HH:MM and timestamps, duration strings, DB text.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, NaiveTime};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Parse a user supplied instant.
///
/// Accepted forms: `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM:SS`,
/// RFC 3339, or a bare `HH:MM` meaning today.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive.and_local_timezone(Local).earliest();
        }
    }

    parse_time(s).and_then(|t| {
        crate::utils::date::today()
            .and_time(t)
            .and_local_timezone(Local)
            .earliest()
    })
}

/// `--at` handling shared by every session command: explicit instant or now.
pub fn now_or(at: Option<&String>) -> AppResult<DateTime<Local>> {
    match at {
        Some(s) => parse_timestamp(s).ok_or_else(|| AppError::InvalidTime(s.to_string())),
        None => Ok(Local::now()),
    }
}

/// Timestamp → DB text (RFC 3339, local offset).
pub fn to_db(dt: &DateTime<Local>) -> String {
    dt.to_rfc3339()
}

/// DB text → timestamp.
pub fn from_db(s: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

/// Parse "8h", "7h30m", "450m" or a bare number of minutes.
pub fn parse_duration_minutes(s: &str) -> Option<i64> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Ok(m) = s.parse::<i64>() {
        return Some(m);
    }

    let mut total = 0i64;
    let mut digits = String::new();
    let mut seen_unit = false;

    for c in s.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' | 'm' => {
                let n: i64 = digits.parse().ok()?;
                let mins = if c == 'h' { n.checked_mul(60)? } else { n };
                total = total.checked_add(mins)?;
                digits.clear();
                seen_unit = true;
            }
            ' ' => {}
            _ => return None,
        }
    }

    if !digits.is_empty() || !seen_unit {
        return None;
    }
    Some(total)
}
