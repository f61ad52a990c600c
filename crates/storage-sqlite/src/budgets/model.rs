//! Database model for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{from_naive_utc, parse_decimal};
use moneymap_core::budgets::Budget;
use moneymap_core::errors::{Error, Result};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub last_alert_sent: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BudgetDB> for Budget {
    type Error = Error;

    fn try_from(db: BudgetDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "budget amount")?,
            last_alert_sent: db.last_alert_sent.map(from_naive_utc),
            id: db.id,
            user_id: db.user_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
