//! Moneymap Core - Domain entities, services, and traits.
//!
//! This crate contains the budget tracking business logic. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate; the email transport is supplied by the server.

pub mod accounts;
pub mod alerts;
pub mod budgets;
pub mod errors;
pub mod transactions;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
