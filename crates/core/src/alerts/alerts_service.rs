use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;

use super::alert_gate::is_eligible;
use super::alerts_model::{
    BudgetAlert, BudgetAlertOutcome, BudgetAlertRunSummary, BudgetAlertSettings,
};
use super::alerts_traits::{BudgetAlertNotifierTrait, BudgetAlertServiceTrait};
use super::budget_evaluator::{percentage_used, remaining, should_alert};
use super::expense_aggregator::ExpenseAggregator;
use super::month_window::current_month_start;
use crate::budgets::{BudgetRepositoryTrait, BudgetWithAccount};
use crate::errors::Result;
use crate::transactions::TransactionRepositoryTrait;
use crate::utils::time_utils::Clock;

/// Periodic job comparing each budget's month-to-date spend with its limit.
///
/// Alerts are sent before the last-alert timestamp is written, and the
/// timestamp is only written after a successful send, so a failed delivery
/// is retried by the next run while a delivered one is not repeated within
/// the same calendar month.
pub struct BudgetAlertService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    aggregator: ExpenseAggregator,
    notifier: Arc<dyn BudgetAlertNotifierTrait>,
    clock: Arc<dyn Clock>,
    settings: BudgetAlertSettings,
}

impl BudgetAlertService {
    pub fn new(
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        notifier: Arc<dyn BudgetAlertNotifierTrait>,
        clock: Arc<dyn Clock>,
        settings: BudgetAlertSettings,
    ) -> Self {
        Self {
            budget_repository,
            aggregator: ExpenseAggregator::new(transaction_repository),
            notifier,
            clock,
            settings,
        }
    }

    async fn check_budget(
        &self,
        entry: &BudgetWithAccount,
        window_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> BudgetAlertOutcome {
        let budget = &entry.budget;

        let Some(account) = entry.default_account.as_ref() else {
            debug!("Budget {}: owner has no default account, skipping", budget.id);
            return BudgetAlertOutcome::NoDefaultAccount;
        };

        let total_expenses =
            match self
                .aggregator
                .sum_expenses(&budget.user_id, &account.id, window_start)
            {
                Ok(total) => total,
                Err(e) => {
                    error!(
                        "Budget {}: failed to aggregate expenses for account {}: {}",
                        budget.id, account.id, e
                    );
                    return BudgetAlertOutcome::AggregationFailed;
                }
            };

        if budget.amount <= Decimal::ZERO {
            warn!(
                "Budget {}: limit {} is not positive, skipping",
                budget.id, budget.amount
            );
            return BudgetAlertOutcome::InvalidLimit;
        }

        let Some(percentage) = percentage_used(total_expenses, budget.amount) else {
            error!(
                "Budget {}: percentage of {} spent against limit {} overflows",
                budget.id, total_expenses, budget.amount
            );
            return BudgetAlertOutcome::PercentageOverflow;
        };

        if !should_alert(percentage) {
            debug!("Budget {}: {}% used, below threshold", budget.id, percentage.round_dp(1));
            return BudgetAlertOutcome::BelowThreshold;
        }

        if !is_eligible(budget.last_alert_sent, now, self.settings.timezone) {
            debug!("Budget {}: already alerted this month", budget.id);
            return BudgetAlertOutcome::AlreadyAlerted;
        }

        let alert = BudgetAlert {
            budget_id: budget.id.clone(),
            user_name: entry.user.display_name().to_string(),
            user_email: entry.user.email.clone(),
            percentage_used: percentage,
            budget_amount: budget.amount,
            total_expenses,
            remaining: remaining(budget.amount, total_expenses),
        };

        if let Err(e) = self.notifier.send_budget_alert(&alert).await {
            warn!(
                "Budget {}: alert delivery to {} failed, will retry next run: {}",
                budget.id, alert.user_email, e
            );
            return BudgetAlertOutcome::DeliveryFailed;
        }

        match self
            .budget_repository
            .update_last_alert_sent(&budget.id, now)
            .await
        {
            Ok(()) => {
                info!(
                    "Budget {}: alert sent to {} ({}% used)",
                    budget.id,
                    alert.user_email,
                    percentage.round_dp(1)
                );
                BudgetAlertOutcome::Alerted
            }
            Err(e) => {
                error!(
                    "Budget {}: alert was sent but last_alert_sent could not be recorded, \
                     it may be sent again: {}",
                    budget.id, e
                );
                BudgetAlertOutcome::RecordFailed
            }
        }
    }
}

#[async_trait]
impl BudgetAlertServiceTrait for BudgetAlertService {
    async fn run_budget_alert_check(&self) -> Result<BudgetAlertRunSummary> {
        let now = self.clock.now();
        let listing = self
            .budget_repository
            .list_budgets_with_default_accounts()
            .map_err(|e| {
                error!("Budget alert check aborted, could not load budgets: {}", e);
                e
            })?;

        let window_start = current_month_start(now, self.settings.timezone);
        debug!(
            "Checking {} budgets against expenses since {}",
            listing.budgets.len(),
            window_start
        );

        let checks: Vec<_> = listing
            .budgets
            .iter()
            .map(|entry| self.check_budget(entry, window_start, now))
            .collect();
        let outcomes: Vec<BudgetAlertOutcome> = stream::iter(checks)
            .buffer_unordered(self.settings.concurrency.max(1))
            .collect()
            .await;

        let mut summary = BudgetAlertRunSummary::new(now);
        for budget_id in &listing.undecodable {
            warn!("Budget {}: stored row could not be decoded, not evaluated", budget_id);
            summary.record(BudgetAlertOutcome::Undecodable);
        }
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary.finished_at = self.clock.now();

        info!(
            "Budget alert check finished: {} evaluated, {} alerted, {} failed",
            summary.evaluated,
            summary.alerted,
            summary.failures()
        );
        Ok(summary)
    }
}
