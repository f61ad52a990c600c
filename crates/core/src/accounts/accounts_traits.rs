//! Account repository trait.
//!
//! The trait defines the read contract for accounts without any
//! database-specific types, allowing for different storage implementations.

use super::accounts_model::Account;
use crate::errors::Result;

/// Read access to accounts.
pub trait AccountRepositoryTrait: Send + Sync {
    /// Returns the user's default account, if one is flagged.
    fn get_default_account(&self, user_id: &str) -> Result<Option<Account>>;
}
