use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::budgets::budgets_model::{Budget, BudgetListing, CurrentBudget};
use crate::errors::Result;

/// Trait for budget repository operations.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Loads every budget with its owner and the owner's default account.
    ///
    /// A row that cannot be decoded is reported in
    /// [`BudgetListing::undecodable`] instead of failing the whole load.
    fn list_budgets_with_default_accounts(&self) -> Result<BudgetListing>;

    fn get_budget_for_user(&self, user_id: &str) -> Result<Option<Budget>>;

    /// Records that an alert was delivered for `budget_id` at `sent_at`.
    async fn update_last_alert_sent(&self, budget_id: &str, sent_at: DateTime<Utc>)
        -> Result<()>;
}

/// Trait for budget service operations.
pub trait BudgetServiceTrait: Send + Sync {
    /// Budget and month-to-date expenses for a user.
    ///
    /// Expenses are summed for `account_id` when given, otherwise for the
    /// user's default account. A user without a default account gets the
    /// total over all of their accounts.
    fn get_current_budget(&self, user_id: &str, account_id: Option<&str>)
        -> Result<CurrentBudget>;
}
