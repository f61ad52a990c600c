use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::month_window::MonthWindow;
use crate::errors::Result;
use crate::transactions::{TransactionRepositoryTrait, TransactionSumFilter};

/// Sums expense transactions of a user.
///
/// Never returns an absent total: an empty match is `Decimal::ZERO`.
/// Storage errors propagate unchanged.
#[derive(Clone)]
pub struct ExpenseAggregator {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl ExpenseAggregator {
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self {
            transaction_repository,
        }
    }

    /// Expenses of one account recorded at or after `since`, with no upper
    /// bound.
    pub fn sum_expenses(
        &self,
        user_id: &str,
        account_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Decimal> {
        let filter = TransactionSumFilter::expenses_since(user_id, Some(account_id), since);
        self.sum(&filter)
    }

    /// Expenses recorded inside `window`, both ends inclusive. `None` sums
    /// every account of the user.
    pub fn sum_expenses_in(
        &self,
        user_id: &str,
        account_id: Option<&str>,
        window: &MonthWindow,
    ) -> Result<Decimal> {
        let filter =
            TransactionSumFilter::expenses_since(user_id, account_id, window.start).until(window.end);
        self.sum(&filter)
    }

    fn sum(&self, filter: &TransactionSumFilter) -> Result<Decimal> {
        Ok(self
            .transaction_repository
            .sum_amounts(filter)?
            .unwrap_or(Decimal::ZERO))
    }
}
