use std::sync::Arc;

use chrono_tz::Tz;

use crate::accounts::AccountRepositoryTrait;
use crate::alerts::{current_month_window, ExpenseAggregator};
use crate::budgets::budgets_model::CurrentBudget;
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::Result;
use crate::transactions::TransactionRepositoryTrait;
use crate::utils::time_utils::Clock;

pub struct BudgetService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    aggregator: ExpenseAggregator,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl BudgetService {
    pub fn new(
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
    ) -> Self {
        BudgetService {
            budget_repository,
            account_repository,
            aggregator: ExpenseAggregator::new(transaction_repository),
            clock,
            timezone,
        }
    }
}

impl BudgetServiceTrait for BudgetService {
    fn get_current_budget(
        &self,
        user_id: &str,
        account_id: Option<&str>,
    ) -> Result<CurrentBudget> {
        let budget = self.budget_repository.get_budget_for_user(user_id)?;
        let window = current_month_window(self.clock.now(), self.timezone);

        let account_id = match account_id {
            Some(id) => Some(id.to_string()),
            None => self
                .account_repository
                .get_default_account(user_id)?
                .map(|account| account.id),
        };

        let current_expenses = self
            .aggregator
            .sum_expenses_in(user_id, account_id.as_deref(), &window)?;

        Ok(CurrentBudget {
            budget,
            account_id,
            current_expenses,
            window,
        })
    }
}
