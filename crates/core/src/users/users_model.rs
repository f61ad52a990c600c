//! User domain model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A person owning accounts and at most one budget.
///
/// `external_id` is the identifier assigned by the identity provider; the
/// HTTP layer resolves callers through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// Name used to greet the user, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}
