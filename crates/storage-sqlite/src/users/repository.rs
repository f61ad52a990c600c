use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::users;

use super::model::UserDB;
use moneymap_core::errors::Result;
use moneymap_core::users::{User, UserRepositoryTrait};

/// Read-only access to users; accounts are provisioned by the auth provider.
pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn get_by_external_id(&self, external_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let user = users::table
            .filter(users::external_id.eq(external_id))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(user.map(User::from))
    }
}
