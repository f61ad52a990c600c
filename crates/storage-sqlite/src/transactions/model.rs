//! Database model for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{from_naive_utc, parse_decimal};
use moneymap_core::errors::{Error, Result};
use moneymap_core::transactions::{Transaction, TransactionType};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub transaction_type: String,
    pub amount: String,
    pub description: Option<String>,
    pub category: String,
    pub transaction_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self> {
        Ok(Self {
            transaction_type: db.transaction_type.parse::<TransactionType>()?,
            amount: parse_decimal(&db.amount, "transaction amount")?,
            transaction_date: from_naive_utc(db.transaction_date),
            id: db.id,
            user_id: db.user_id,
            account_id: db.account_id,
            description: db.description,
            category: db.category,
            created_at: db.created_at,
        })
    }
}
