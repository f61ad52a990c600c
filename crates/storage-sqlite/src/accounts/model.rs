//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::parse_decimal;
use moneymap_core::accounts::{Account, AccountType};
use moneymap_core::errors::{Error, Result};

/// Database model for accounts
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: String,
    pub balance: String,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self> {
        Ok(Self {
            balance: parse_decimal(&db.balance, "account balance")?,
            account_type: db.account_type.parse::<AccountType>()?,
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            is_default: db.is_default,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
