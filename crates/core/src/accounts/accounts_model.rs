//! Account domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts_constants::account_types;
use crate::errors::{Error, ValidationError};

/// Kind of account a user keeps money in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    #[default]
    Current,
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Current => account_types::CURRENT,
            AccountType::Savings => account_types::SAVINGS,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            account_types::CURRENT => Ok(AccountType::Current),
            account_types::SAVINGS => Ok(AccountType::Savings),
            other => Err(Error::Validation(ValidationError::UnknownVariant {
                kind: "account type",
                value: other.to_string(),
            })),
        }
    }
}

/// Domain model representing an account in the system.
///
/// Each user has at most one account with `is_default` set; budgets are
/// evaluated against that account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_type_round_trips_through_storage_text() {
        for kind in [AccountType::Current, AccountType::Savings] {
            assert_eq!(kind.as_str().parse::<AccountType>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_account_type_is_rejected() {
        let err = "CHECKING".parse::<AccountType>().unwrap_err();
        assert!(err.to_string().contains("CHECKING"));
    }
}
