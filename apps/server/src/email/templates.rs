//! Budget alert email rendering.

use rust_decimal::{Decimal, RoundingStrategy};

use moneymap_core::alerts::BudgetAlert;

pub const BUDGET_ALERT_SUBJECT: &str = "Budget Alert";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Renders the alert as HTML and plain text.
pub fn render_budget_alert(alert: &BudgetAlert, currency_prefix: &str) -> RenderedEmail {
    let name = alert.user_name.trim();
    let percentage = format_percentage(alert.percentage_used);
    let budget = format_amount(currency_prefix, alert.budget_amount);
    let spent = format_amount(currency_prefix, alert.total_expenses);
    let remaining = format_amount(currency_prefix, alert.remaining);

    let text = format!(
        "Hello {name},\n\n\
         You've used {percentage}% of your monthly budget.\n\n\
         Budget Amount: {budget}\n\
         Spent so far: {spent}\n\
         Remaining: {remaining}\n"
    );

    let html = format!(
        r#"<!DOCTYPE html>
<html>
  <body style="background-color:#f6f9fc;font-family:-apple-system,sans-serif;">
    <div style="background-color:#ffffff;margin:0 auto;padding:20px;border-radius:5px;">
      <h1 style="color:#1f2937;font-size:20px;font-weight:600;">Budget Alert</h1>
      <p style="color:#4b5563;font-size:16px;">Hello {name},</p>
      <p style="color:#4b5563;font-size:16px;">You&rsquo;ve used {percentage}% of your monthly budget.</p>
      <div style="margin-top:32px;padding:20px;background-color:#f9fafb;border:1px solid #e5e7eb;border-radius:5px;">
        <p style="color:#4b5563;">Budget Amount</p>
        <p style="color:#1f2937;font-size:20px;font-weight:600;">{budget}</p>
        <p style="color:#4b5563;">Spent so far</p>
        <p style="color:#1f2937;font-size:20px;font-weight:600;">{spent}</p>
        <p style="color:#4b5563;">Remaining</p>
        <p style="color:#1f2937;font-size:20px;font-weight:600;">{remaining}</p>
      </div>
    </div>
  </body>
</html>
"#,
        name = escape_html(name),
        budget = escape_html(&budget),
        spent = escape_html(&spent),
        remaining = escape_html(&remaining),
    );

    RenderedEmail {
        subject: BUDGET_ALERT_SUBJECT.to_string(),
        html,
        text,
    }
}

fn format_percentage(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}", rounded)
}

/// `Rs.1500.00`, or `-Rs.150.00` once the budget is overspent.
fn format_amount(prefix: &str, value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", prefix, rounded.abs())
    } else {
        format!("{}{:.2}", prefix, rounded.abs())
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn alert() -> BudgetAlert {
        BudgetAlert {
            budget_id: "b1".to_string(),
            user_name: "Asha".to_string(),
            user_email: "asha@example.com".to_string(),
            percentage_used: dec!(85.25),
            budget_amount: dec!(2000),
            total_expenses: dec!(1705),
            remaining: dec!(295),
        }
    }

    #[test]
    fn text_body_carries_the_figures() {
        let email = render_budget_alert(&alert(), "Rs.");

        assert_eq!(email.subject, "Budget Alert");
        assert!(email.text.starts_with("Hello Asha,"));
        assert!(email.text.contains("You've used 85.3% of your monthly budget."));
        assert!(email.text.contains("Budget Amount: Rs.2000.00"));
        assert!(email.text.contains("Spent so far: Rs.1705.00"));
        assert!(email.text.contains("Remaining: Rs.295.00"));
    }

    #[test]
    fn html_body_escapes_the_name() {
        let mut alert = alert();
        alert.user_name = "<b>Asha & co</b>".to_string();

        let email = render_budget_alert(&alert, "$");

        assert!(email.html.contains("Hello &lt;b&gt;Asha &amp; co&lt;/b&gt;,"));
        assert!(email.html.contains("$2000.00"));
        assert!(!email.html.contains("<b>Asha"));
    }

    #[test]
    fn overspent_budget_shows_negative_remaining() {
        let mut alert = alert();
        alert.total_expenses = dec!(2150.5);
        alert.remaining = dec!(-150.5);
        alert.percentage_used = dec!(107.525);

        let email = render_budget_alert(&alert, "Rs.");

        assert!(email.text.contains("Remaining: -Rs.150.50"));
        assert!(email.text.contains("107.5%"));
    }

    #[test]
    fn percentage_rounds_half_away_from_zero() {
        assert_eq!(format_percentage(dec!(80.05)), "80.1");
        assert_eq!(format_percentage(dec!(80)), "80.0");
        assert_eq!(format_percentage(dec!(99.94)), "99.9");
    }
}
