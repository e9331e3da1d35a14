//! Worked-time arithmetic over stored session timestamps.
//!
//! Everything here is pure: callers pass `now` explicitly, so the display
//! tick, the session transitions and the tests all share one definition.

use chrono::{DateTime, Local};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;

/// Worked milliseconds at `now`.
///
/// `pause_minutes` is the cumulative paused time already folded in;
/// `pause_started_at` is set while a pause is still open. The result is
/// clamped at zero, so clock skew never yields negative time.
pub fn worked_ms(
    now: DateTime<Local>,
    start: DateTime<Local>,
    pause_minutes: i64,
    pause_started_at: Option<DateTime<Local>>,
) -> i64 {
    let elapsed = (now - start).num_milliseconds();
    let paused = pause_minutes.max(0) * MS_PER_MINUTE;
    let open_pause = pause_started_at
        .map(|p| (now - p).num_milliseconds())
        .unwrap_or(0);

    (elapsed - paused - open_pause).max(0)
}

/// Whole minutes between pause and resume, rounded down, never negative.
pub fn pause_minutes_between(pause_start: DateTime<Local>, resume: DateTime<Local>) -> i64 {
    (resume - pause_start).num_minutes().max(0)
}

/// Hours rounded to two decimals, as stored in `total_hours`.
pub fn total_hours(worked_ms: i64) -> f64 {
    let hours = worked_ms.max(0) as f64 / MS_PER_HOUR as f64;
    (hours * 100.0).round() / 100.0
}

/// Worked minutes, rounded down.
pub fn worked_minutes(worked_ms: i64) -> i64 {
    worked_ms.max(0) / MS_PER_MINUTE
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 9, 1, h, m, 0).unwrap()
    }

    #[test]
    fn plain_elapsed_time() {
        assert_eq!(worked_ms(at(10, 0), at(9, 0), 0, None), 60 * MS_PER_MINUTE);
    }

    #[test]
    fn folded_and_open_pauses_are_subtracted() {
        // 09:00 → 11:00 with 30 min folded in and a pause open since 10:45.
        let ms = worked_ms(at(11, 0), at(9, 0), 30, Some(at(10, 45)));
        assert_eq!(ms, 75 * MS_PER_MINUTE);
    }

    #[test]
    fn clamps_to_zero() {
        assert_eq!(worked_ms(at(8, 0), at(9, 0), 0, None), 0);
        assert_eq!(worked_ms(at(9, 10), at(9, 0), 60, None), 0);
    }

    #[test]
    fn never_exceeds_elapsed_for_any_pause() {
        let start = at(9, 0);
        for minutes_later in [0i64, 1, 59, 61, 600] {
            let now = start + Duration::minutes(minutes_later);
            for pause in [0i64, 1, 15, 90, 1_000] {
                let ms = worked_ms(now, start, pause, None);
                assert!(ms >= 0);
                assert!(ms <= (now - start).num_milliseconds());
            }
        }
    }

    #[test]
    fn pause_minutes_round_down() {
        let p = at(9, 30);
        assert_eq!(pause_minutes_between(p, p + Duration::seconds(119)), 1);
        assert_eq!(pause_minutes_between(p, p - Duration::minutes(5)), 0);
    }

    #[test]
    fn hours_rounding() {
        assert_eq!(total_hours(90 * MS_PER_MINUTE), 1.5);
        assert_eq!(total_hours(20 * MS_PER_MINUTE), 0.33);
        assert_eq!(worked_minutes(90 * MS_PER_MINUTE + 59_999), 90);
    }
}
