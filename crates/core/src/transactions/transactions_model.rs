//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(Error::Validation(ValidationError::UnknownVariant {
                kind: "transaction type",
                value: other.to_string(),
            })),
        }
    }
}

/// A single income or expense entry on an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub category: String,
    pub transaction_date: DateTime<Utc>,
    pub created_at: NaiveDateTime,
}

/// Selects the transactions whose amounts are summed.
///
/// `from` is inclusive. `to` is inclusive when present; `None` means
/// "through now and beyond". Without an `account_id` every account of the
/// user is included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSumFilter {
    pub user_id: String,
    pub account_id: Option<String>,
    pub transaction_type: TransactionType,
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
}

impl TransactionSumFilter {
    /// Expenses since `from`, without an upper bound.
    pub fn expenses_since(user_id: &str, account_id: Option<&str>, from: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            account_id: account_id.map(str::to_string),
            transaction_type: TransactionType::Expense,
            from,
            to: None,
        }
    }

    pub fn until(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }
}

#[cfg(test)]
impl TransactionSumFilter {
    pub(crate) fn matches(&self, tx: &Transaction) -> bool {
        tx.user_id == self.user_id
            && self.account_id.as_ref().map_or(true, |id| *id == tx.account_id)
            && tx.transaction_type == self.transaction_type
            && tx.transaction_date >= self.from
            && self.to.map_or(true, |to| tx.transaction_date <= to)
    }
}
