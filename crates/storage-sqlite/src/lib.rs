//! SQLite storage implementation for Moneymap.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `moneymap-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, accounts, transactions and budgets
//! - Database-specific model types (with Diesel derives)
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod accounts;
pub mod budgets;
pub mod transactions;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from moneymap-core for convenience
pub use moneymap_core::errors::{DatabaseError, Error, Result};
