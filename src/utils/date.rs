use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse an optional `YYYY-MM-DD` argument, falling back to today.
pub fn parse_date_or_today(s: Option<&String>) -> Option<NaiveDate> {
    match s {
        Some(v) => parse_date(v),
        None => Some(today()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_date("2025-09-01"), NaiveDate::from_ymd_opt(2025, 9, 1));
        assert_eq!(parse_date(" 2025-09-01 "), NaiveDate::from_ymd_opt(2025, 9, 1));
        assert!(parse_date("01/09/2025").is_none());
        assert!(parse_date("2025-13-01").is_none());
    }
}
