//! Transactions module - income/expense records and aggregate queries.

mod transactions_model;
mod transactions_traits;

pub use transactions_model::{Transaction, TransactionSumFilter, TransactionType};
pub use transactions_traits::TransactionRepositoryTrait;
