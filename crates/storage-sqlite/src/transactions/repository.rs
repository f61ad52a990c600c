use diesel::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::model::TransactionDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::transactions;
use crate::utils::to_naive_utc;

use moneymap_core::errors::{Result, ValidationError};
use moneymap_core::transactions::{Transaction, TransactionRepositoryTrait, TransactionSumFilter};

pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    /// Sums matching amounts in Rust; SQLite would coerce the TEXT column to REAL.
    fn sum_amounts(&self, filter: &TransactionSumFilter) -> Result<Option<Decimal>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::user_id.eq(&filter.user_id))
            .filter(transactions::transaction_type.eq(filter.transaction_type.as_str()))
            .filter(transactions::transaction_date.ge(to_naive_utc(filter.from)))
            .into_boxed();

        if let Some(account_id) = &filter.account_id {
            query = query.filter(transactions::account_id.eq(account_id));
        }
        if let Some(to) = filter.to {
            query = query.filter(transactions::transaction_date.le(to_naive_utc(to)));
        }

        let rows = query
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut total = Decimal::ZERO;
        for row in rows {
            let transaction = Transaction::try_from(row)?;
            total = total.checked_add(transaction.amount).ok_or_else(|| {
                ValidationError::InvalidInput(format!(
                    "expense total overflowed for user {}",
                    filter.user_id
                ))
            })?;
        }

        Ok(Some(total))
    }
}
