//! Calendar month boundaries.
//!
//! All functions are pure: the caller supplies the instant (normally from a
//! [`Clock`](crate::utils::time_utils::Clock)) and the timezone in which
//! calendar months are counted.

use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils::{
    first_day_of_month, first_day_of_next_month, local_date, local_midnight_utc,
};

/// Closed interval covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    /// Last representable instant of the month.
    pub end: DateTime<Utc>,
}

/// First instant of the calendar month containing `now`.
pub fn current_month_start(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    local_midnight_utc(first_day_of_month(local_date(now, tz)), tz)
}

/// Calendar month containing `now`, from its first to its last instant.
pub fn current_month_window(now: DateTime<Utc>, tz: Tz) -> MonthWindow {
    let today = local_date(now, tz);
    let start = local_midnight_utc(first_day_of_month(today), tz);
    let next = local_midnight_utc(first_day_of_next_month(today), tz);
    MonthWindow {
        start,
        end: next - Duration::microseconds(1),
    }
}

/// True iff the two instants fall in different calendar months or years.
pub fn is_new_month(previous: DateTime<Utc>, current: DateTime<Utc>, tz: Tz) -> bool {
    let previous = local_date(previous, tz);
    let current = local_date(current, tz);
    previous.month() != current.month() || previous.year() != current.year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::UTC;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn month_start_is_first_instant() {
        let start = current_month_start(utc(2025, 1, 20, 15, 42, 7), UTC);
        assert_eq!(start, utc(2025, 1, 1, 0, 0, 0));
    }

    #[test]
    fn month_start_on_the_first_is_itself_at_midnight() {
        let start = current_month_start(utc(2025, 2, 1, 0, 0, 0), UTC);
        assert_eq!(start, utc(2025, 2, 1, 0, 0, 0));
    }

    #[test]
    fn window_ends_just_before_next_month() {
        let window = current_month_window(utc(2024, 2, 10, 8, 0, 0), UTC);
        assert_eq!(window.start, utc(2024, 2, 1, 0, 0, 0));
        assert_eq!(
            window.end,
            utc(2024, 3, 1, 0, 0, 0) - Duration::microseconds(1)
        );
        assert!(utc(2024, 2, 29, 23, 59, 59) <= window.end);
    }

    #[test]
    fn december_window_rolls_into_january() {
        let window = current_month_window(utc(2024, 12, 31, 23, 0, 0), UTC);
        assert_eq!(window.start, utc(2024, 12, 1, 0, 0, 0));
        assert!(window.end < utc(2025, 1, 1, 0, 0, 0));
    }

    #[test]
    fn month_start_uses_configured_timezone() {
        // 2025-03-01 02:00 in Kolkata is still February in UTC.
        let now = utc(2025, 2, 28, 20, 30, 0);
        let start = current_month_start(now, chrono_tz::Asia::Kolkata);
        assert_eq!(start, utc(2025, 2, 28, 18, 30, 0));
        assert_eq!(current_month_start(now, UTC), utc(2025, 2, 1, 0, 0, 0));
    }

    #[test]
    fn same_month_is_not_new() {
        assert!(!is_new_month(
            utc(2025, 1, 15, 0, 0, 0),
            utc(2025, 1, 20, 0, 0, 0),
            UTC
        ));
    }

    #[test]
    fn next_month_is_new() {
        assert!(is_new_month(
            utc(2025, 1, 15, 0, 0, 0),
            utc(2025, 2, 1, 0, 0, 0),
            UTC
        ));
    }

    #[test]
    fn same_month_of_another_year_is_new() {
        assert!(is_new_month(
            utc(2024, 1, 15, 0, 0, 0),
            utc(2025, 1, 15, 0, 0, 0),
            UTC
        ));
    }
}
