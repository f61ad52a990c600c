//! Budgets module - monthly spending limits, storage traits and the
//! current-month read model.

mod budgets_model;
mod budgets_service;
mod budgets_traits;

pub use budgets_model::{Budget, BudgetListing, BudgetWithAccount, CurrentBudget};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
