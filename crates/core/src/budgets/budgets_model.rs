//! Budget domain models.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::Account;
use crate::alerts::MonthWindow;
use crate::users::User;

/// A user's monthly spending limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    /// Last time a threshold alert was delivered for this budget.
    pub last_alert_sent: Option<DateTime<Utc>>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A budget joined with its owner and the owner's default account.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetWithAccount {
    pub budget: Budget,
    pub user: User,
    pub default_account: Option<Account>,
}

/// Result of loading every budget for an alert run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetListing {
    pub budgets: Vec<BudgetWithAccount>,
    /// Ids of stored budgets that could not be decoded.
    pub undecodable: Vec<String>,
}

/// Budget progress for the current calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentBudget {
    pub budget: Option<Budget>,
    /// Account the expenses were summed for; absent when the total spans
    /// all of the user's accounts.
    pub account_id: Option<String>,
    pub current_expenses: Decimal,
    pub window: MonthWindow,
}
