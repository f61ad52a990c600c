/// Account type constants as stored in the database.
pub mod account_types {
    pub const CURRENT: &str = "CURRENT";
    pub const SAVINGS: &str = "SAVINGS";
}
