use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Parse a `--range` expression into inclusive date bounds.
///
/// Supports `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and `start:end` where both sides
/// use the same one of those shapes.
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let bad = || AppError::InvalidDate(format!("unsupported range '{r}'"));

    match r.split_once(':') {
        Some((start_raw, end_raw)) => {
            let (start, end) = (start_raw.trim(), end_raw.trim());
            if start.len() != end.len() {
                return Err(AppError::InvalidDate(format!(
                    "range '{r}': start and end must have the same format"
                )));
            }

            let (d1, _) = period_bounds(start).ok_or_else(bad)?;
            let (_, d2) = period_bounds(end).ok_or_else(bad)?;
            if d2 < d1 {
                return Err(AppError::InvalidDate(format!("range '{r}' ends before it starts")));
            }
            Ok((d1, d2))
        }
        None => period_bounds(r.trim()).ok_or_else(bad),
    }
}

/// First and last day of a year, month or single day.
fn period_bounds(p: &str) -> Option<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        7 => {
            let y: i32 = p.get(0..4)?.parse().ok()?;
            let m: u32 = p.get(5..7)?.parse().ok()?;
            let first = NaiveDate::from_ymd_opt(y, m, 1)?;
            let next = if m == 12 {
                NaiveDate::from_ymd_opt(y + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(y, m + 1, 1)?
            };
            Some((first, next.pred_opt()?))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2025").unwrap(), (d("2025-01-01"), d("2025-12-31")));
        assert_eq!(parse_range("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
        assert_eq!(parse_range("2025-12").unwrap(), (d("2025-12-01"), d("2025-12-31")));
        assert_eq!(parse_range("2025-09-03").unwrap(), (d("2025-09-03"), d("2025-09-03")));
    }

    #[test]
    fn intervals() {
        assert_eq!(
            parse_range("2024-11:2025-01").unwrap(),
            (d("2024-11-01"), d("2025-01-31"))
        );
        assert!(parse_range("2025:2025-01").is_err());
        assert!(parse_range("2025-02:2025-01").is_err());
        assert!(parse_range("2025-13").is_err());
        assert!(parse_range("last week").is_err());
    }
}
