use rust_decimal::Decimal;

use crate::errors::Result;
use crate::transactions::transactions_model::TransactionSumFilter;

/// Aggregate queries over transactions.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Sums the amounts of all transactions matching `filter`.
    ///
    /// Returns `None` when no transaction matched, mirroring an SQL `SUM`
    /// over an empty set. Callers decide what absence means.
    fn sum_amounts(&self, filter: &TransactionSumFilter) -> Result<Option<Decimal>>;
}
