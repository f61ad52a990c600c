//! Budget alert domain models.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils::DEFAULT_BUDGET_TZ;

/// Default number of budgets evaluated concurrently.
pub const DEFAULT_ALERT_CONCURRENCY: usize = 4;

/// Payload handed to the notifier when a budget crosses the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlert {
    pub budget_id: String,
    pub user_name: String,
    pub user_email: String,
    pub percentage_used: Decimal,
    pub budget_amount: Decimal,
    pub total_expenses: Decimal,
    pub remaining: Decimal,
}

/// What happened to one budget during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetAlertOutcome {
    /// Owner has no default account.
    NoDefaultAccount,
    /// Limit is zero or negative.
    InvalidLimit,
    /// Percentage used does not fit in a decimal.
    PercentageOverflow,
    BelowThreshold,
    /// Already alerted this calendar month.
    AlreadyAlerted,
    Alerted,
    AggregationFailed,
    /// Notifier failed; timestamp left untouched so the next run retries.
    DeliveryFailed,
    /// Alert went out but the timestamp could not be saved.
    RecordFailed,
    /// Stored budget row could not be decoded.
    Undecodable,
}

/// Completion report of one job invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlertRunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub evaluated: usize,
    pub alerted: usize,
    pub no_default_account: usize,
    pub invalid_limit: usize,
    pub percentage_overflow: usize,
    pub below_threshold: usize,
    pub already_alerted: usize,
    pub aggregation_failed: usize,
    pub delivery_failed: usize,
    pub record_failed: usize,
    pub undecodable: usize,
}

impl BudgetAlertRunSummary {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: started_at,
            evaluated: 0,
            alerted: 0,
            no_default_account: 0,
            invalid_limit: 0,
            percentage_overflow: 0,
            below_threshold: 0,
            already_alerted: 0,
            aggregation_failed: 0,
            delivery_failed: 0,
            record_failed: 0,
            undecodable: 0,
        }
    }

    pub fn record(&mut self, outcome: BudgetAlertOutcome) {
        let counter = match outcome {
            BudgetAlertOutcome::NoDefaultAccount => &mut self.no_default_account,
            BudgetAlertOutcome::InvalidLimit => &mut self.invalid_limit,
            BudgetAlertOutcome::PercentageOverflow => &mut self.percentage_overflow,
            BudgetAlertOutcome::BelowThreshold => &mut self.below_threshold,
            BudgetAlertOutcome::AlreadyAlerted => &mut self.already_alerted,
            BudgetAlertOutcome::Alerted => &mut self.alerted,
            BudgetAlertOutcome::AggregationFailed => &mut self.aggregation_failed,
            BudgetAlertOutcome::DeliveryFailed => &mut self.delivery_failed,
            BudgetAlertOutcome::RecordFailed => &mut self.record_failed,
            BudgetAlertOutcome::Undecodable => &mut self.undecodable,
        };
        *counter += 1;
        self.evaluated += 1;
    }

    /// Number of budgets whose evaluation hit an error.
    pub fn failures(&self) -> usize {
        self.aggregation_failed
            + self.percentage_overflow
            + self.delivery_failed
            + self.record_failed
            + self.undecodable
    }
}

/// Tunables for the alert job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetAlertSettings {
    /// Timezone in which calendar months are counted.
    pub timezone: Tz,
    /// Budgets evaluated concurrently; values below 1 are treated as 1.
    pub concurrency: usize,
}

impl Default for BudgetAlertSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_BUDGET_TZ,
            concurrency: DEFAULT_ALERT_CONCURRENCY,
        }
    }
}
