//! Monthly deduplication of budget alerts.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::month_window::is_new_month;

/// Whether a budget may be alerted at `now`.
///
/// A budget that was never alerted is eligible. Otherwise the last alert
/// must belong to an earlier calendar month, so repeated runs within a month
/// send at most one alert.
pub fn is_eligible(last_alert_sent: Option<DateTime<Utc>>, now: DateTime<Utc>, tz: Tz) -> bool {
    match last_alert_sent {
        None => true,
        Some(last) => is_new_month(last, now, tz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::UTC;

    #[test]
    fn never_alerted_is_eligible() {
        let now = Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap();
        assert!(is_eligible(None, now, UTC));
    }

    #[test]
    fn alert_earlier_this_month_blocks() {
        let last = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap();
        assert!(!is_eligible(Some(last), now, UTC));
    }

    #[test]
    fn alert_last_month_allows() {
        let last = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert!(is_eligible(Some(last), now, UTC));
    }
}
