use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use log::error;
use std::sync::Arc;

use crate::accounts::AccountDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{accounts, budgets, users};
use crate::users::UserDB;
use crate::utils::to_naive_utc;

use super::model::BudgetDB;
use moneymap_core::accounts::Account;
use moneymap_core::budgets::{Budget, BudgetListing, BudgetRepositoryTrait, BudgetWithAccount};
use moneymap_core::errors::{DatabaseError, Error, Result};

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn into_budget_with_account(
    (budget, user, account): (BudgetDB, UserDB, Option<AccountDB>),
) -> Result<BudgetWithAccount> {
    Ok(BudgetWithAccount {
        budget: Budget::try_from(budget)?,
        user: user.into(),
        default_account: account.map(Account::try_from).transpose()?,
    })
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    /// Rows that cannot be decoded are logged and listed by id; the rest are
    /// still returned.
    fn list_budgets_with_default_accounts(&self) -> Result<BudgetListing> {
        let mut conn = get_connection(&self.pool)?;

        let rows = budgets::table
            .inner_join(users::table)
            .left_join(
                accounts::table.on(accounts::user_id
                    .eq(budgets::user_id)
                    .and(accounts::is_default.eq(true))),
            )
            .select((
                BudgetDB::as_select(),
                UserDB::as_select(),
                Option::<AccountDB>::as_select(),
            ))
            .order(budgets::created_at.asc())
            .load::<(BudgetDB, UserDB, Option<AccountDB>)>(&mut conn)
            .into_core()?;

        let mut listing = BudgetListing::default();
        for row in rows {
            let budget_id = row.0.id.clone();
            match into_budget_with_account(row) {
                Ok(entry) => listing.budgets.push(entry),
                Err(e) => {
                    error!("Skipping budget {}: {}", budget_id, e);
                    listing.undecodable.push(budget_id);
                }
            }
        }
        Ok(listing)
    }

    fn get_budget_for_user(&self, owner_id: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        budgets::table
            .filter(budgets::user_id.eq(owner_id))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Budget::try_from)
            .transpose()
    }

    async fn update_last_alert_sent(&self, budget_id: &str, sent_at: DateTime<Utc>) -> Result<()> {
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn| {
                let sent_at = to_naive_utc(sent_at);
                let updated = diesel::update(budgets::table.find(&budget_id))
                    .set((
                        budgets::last_alert_sent.eq(Some(sent_at)),
                        budgets::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                if updated == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "budget {}",
                        budget_id
                    ))));
                }
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use chrono::TimeZone;
    use diesel::sql_query;
    use rust_decimal_macros::dec;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (TempDir, Arc<DbPool>, BudgetRepository) {
        let dir = tempdir().unwrap();
        let db_path = init(dir.path().join("app.db").to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();

        let mut conn = get_connection(&pool).unwrap();
        sql_query(
            "INSERT INTO users (id, external_id, email, name) VALUES
                ('u1', 'ext-1', 'asha@example.com', 'Asha'),
                ('u2', 'ext-2', 'ravi@example.com', NULL)",
        )
        .execute(&mut conn)
        .unwrap();
        sql_query(
            "INSERT INTO accounts (id, user_id, name, account_type, balance, is_default) VALUES
                ('acc-1', 'u1', 'Main', 'CURRENT', '100.00', 1),
                ('acc-2', 'u1', 'Savings', 'SAVINGS', '0', 0),
                ('acc-3', 'u2', 'Savings', 'SAVINGS', '0', 0)",
        )
        .execute(&mut conn)
        .unwrap();
        sql_query(
            "INSERT INTO budgets (id, user_id, amount, last_alert_sent, created_at) VALUES
                ('b1', 'u1', '2000', NULL, '2025-01-01 00:00:00'),
                ('b2', 'u2', '500.50', '2025-03-10 08:30:00', '2025-01-02 00:00:00')",
        )
        .execute(&mut conn)
        .unwrap();

        let writer = spawn_writer((*pool).clone());
        let repo = BudgetRepository::new(pool.clone(), writer);
        (dir, pool, repo)
    }

    #[tokio::test]
    async fn lists_budgets_with_owner_and_default_account() {
        let (_dir, _pool, repo) = setup();

        let listing = repo.list_budgets_with_default_accounts().unwrap();
        let entries = &listing.budgets;

        assert!(listing.undecodable.is_empty());
        assert_eq!(entries.len(), 2);
        let first = &entries[0];
        assert_eq!(first.budget.id, "b1");
        assert_eq!(first.budget.amount, dec!(2000));
        assert_eq!(first.user.email, "asha@example.com");
        assert_eq!(
            first.default_account.as_ref().map(|a| a.id.as_str()),
            Some("acc-1")
        );

        let second = &entries[1];
        assert_eq!(second.budget.id, "b2");
        assert!(second.default_account.is_none());
        assert_eq!(
            second.budget.last_alert_sent,
            Some(Utc.with_ymd_and_hms(2025, 3, 10, 8, 30, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn corrupt_budget_rows_are_reported_by_id() {
        let (_dir, pool, repo) = setup();
        let mut conn = get_connection(&pool).unwrap();
        sql_query("UPDATE budgets SET amount = 'n/a' WHERE id = 'b2'")
            .execute(&mut conn)
            .unwrap();

        let listing = repo.list_budgets_with_default_accounts().unwrap();

        assert_eq!(listing.budgets.len(), 1);
        assert_eq!(listing.budgets[0].budget.id, "b1");
        assert_eq!(listing.undecodable, vec!["b2".to_string()]);
    }

    #[tokio::test]
    async fn records_last_alert_sent() {
        let (_dir, _pool, repo) = setup();
        let sent_at = Utc.with_ymd_and_hms(2025, 4, 17, 10, 0, 0).unwrap();

        repo.update_last_alert_sent("b1", sent_at).await.unwrap();

        let budget = repo.get_budget_for_user("u1").unwrap().unwrap();
        assert_eq!(budget.last_alert_sent, Some(sent_at));
    }

    #[tokio::test]
    async fn recording_unknown_budget_is_not_found() {
        let (_dir, _pool, repo) = setup();

        let err = repo
            .update_last_alert_sent("missing", Utc::now())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn budget_lookup_by_user() {
        let (_dir, _pool, repo) = setup();

        assert_eq!(
            repo.get_budget_for_user("u2").unwrap().map(|b| b.amount),
            Some(dec!(500.50))
        );
        assert!(repo.get_budget_for_user("nobody").unwrap().is_none());
    }
}
