use async_trait::async_trait;

use crate::alerts::alerts_model::{BudgetAlert, BudgetAlertRunSummary};
use crate::errors::Result;

/// Delivers budget alerts to users.
#[async_trait]
pub trait BudgetAlertNotifierTrait: Send + Sync {
    /// Sends one alert. An `Err` means the user was not notified.
    async fn send_budget_alert(&self, alert: &BudgetAlert) -> Result<()>;
}

/// Entry point of the periodic budget alert job.
#[async_trait]
pub trait BudgetAlertServiceTrait: Send + Sync {
    /// Evaluates every budget once.
    ///
    /// Per-budget failures are counted in the summary; only a failure to
    /// load the budgets is returned as an error.
    async fn run_budget_alert_check(&self) -> Result<BudgetAlertRunSummary>;
}
