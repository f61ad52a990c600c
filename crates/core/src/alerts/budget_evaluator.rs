//! Percentage-used computation and the alert threshold.

use rust_decimal::Decimal;

/// Share of the budget, in percent, at which an alert fires.
pub const ALERT_THRESHOLD_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// `expenses / limit * 100`, or `None` when the limit is not positive or
/// the result does not fit in a `Decimal`.
pub fn percentage_used(expenses: Decimal, limit: Decimal) -> Option<Decimal> {
    if limit <= Decimal::ZERO {
        return None;
    }
    expenses
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(limit)
}

pub fn should_alert(percentage: Decimal) -> bool {
    percentage >= ALERT_THRESHOLD_PERCENT
}

/// Amount left in the budget; negative once overspent.
pub fn remaining(limit: Decimal, expenses: Decimal) -> Decimal {
    limit - expenses
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn eighty_five_percent_alerts() {
        let pct = percentage_used(dec!(850), dec!(1000)).unwrap();
        assert_eq!(pct, dec!(85.0));
        assert!(should_alert(pct));
    }

    #[test]
    fn just_below_threshold_does_not_alert() {
        let pct = percentage_used(dec!(799), dec!(1000)).unwrap();
        assert_eq!(pct, dec!(79.9));
        assert!(!should_alert(pct));
    }

    #[test]
    fn exactly_at_threshold_alerts() {
        let pct = percentage_used(dec!(800), dec!(1000)).unwrap();
        assert!(should_alert(pct));
    }

    #[test]
    fn zero_or_negative_limit_has_no_percentage() {
        assert_eq!(percentage_used(dec!(100), Decimal::ZERO), None);
        assert_eq!(percentage_used(dec!(100), dec!(-50)), None);
    }

    #[test]
    fn no_expenses_is_zero_percent() {
        assert_eq!(
            percentage_used(Decimal::ZERO, dec!(1000)),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn overflow_is_not_a_panic() {
        assert_eq!(percentage_used(Decimal::MAX, dec!(0.5)), None);
    }

    #[test]
    fn remaining_goes_negative_when_overspent() {
        assert_eq!(remaining(dec!(1000), dec!(1250.50)), dec!(-250.50));
        assert_eq!(remaining(dec!(1000), dec!(850)), dec!(150));
    }
}
