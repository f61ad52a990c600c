use crate::errors::Result;
use crate::users::users_model::User;

/// Read access to users.
pub trait UserRepositoryTrait: Send + Sync {
    /// Looks a user up by the identity provider's id.
    fn get_by_external_id(&self, external_id: &str) -> Result<Option<User>>;
}
