use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::accounts;

use super::model::AccountDB;
use moneymap_core::accounts::{Account, AccountRepositoryTrait};
use moneymap_core::errors::Result;

/// Repository for reading account data from the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl AccountRepositoryTrait for AccountRepository {
    fn get_default_account(&self, owner_id: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        accounts::table
            .filter(accounts::user_id.eq(owner_id))
            .filter(accounts::is_default.eq(true))
            .select(AccountDB::as_select())
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Account::try_from)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations};
    use diesel::sql_query;
    use moneymap_core::accounts::AccountType;
    use rust_decimal_macros::dec;
    use tempfile::{tempdir, TempDir};

    fn setup() -> (TempDir, Arc<DbPool>) {
        let dir = tempdir().unwrap();
        let db_path = init(dir.path().join("app.db").to_str().unwrap()).unwrap();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();

        let mut conn = get_connection(&pool).unwrap();
        sql_query(
            "INSERT INTO users (id, external_id, email) VALUES
                ('u1', 'ext-1', 'asha@example.com'),
                ('u2', 'ext-2', 'ravi@example.com')",
        )
        .execute(&mut conn)
        .unwrap();
        sql_query(
            "INSERT INTO accounts (id, user_id, name, account_type, balance, is_default) VALUES
                ('acc-1', 'u1', 'Wallet', 'SAVINGS', '10.5', 0),
                ('acc-2', 'u1', 'Main', 'CURRENT', '2500.75', 1),
                ('acc-3', 'u2', 'Main', 'CURRENT', '0', 0)",
        )
        .execute(&mut conn)
        .unwrap();
        (dir, pool)
    }

    #[test]
    fn finds_the_default_account() {
        let (_dir, pool) = setup();
        let repo = AccountRepository::new(pool);

        let account = repo.get_default_account("u1").unwrap().unwrap();

        assert_eq!(account.id, "acc-2");
        assert_eq!(account.account_type, AccountType::Current);
        assert_eq!(account.balance, dec!(2500.75));
        assert!(repo.get_default_account("u2").unwrap().is_none());
    }

    #[test]
    fn second_default_account_is_rejected() {
        let (_dir, pool) = setup();
        let mut conn = get_connection(&pool).unwrap();

        let result = sql_query("UPDATE accounts SET is_default = 1 WHERE id = 'acc-1'")
            .execute(&mut conn);

        assert!(result.is_err());
    }
}
