//! Budget alerts module - month window, aggregation, threshold evaluation,
//! monthly deduplication and the periodic alert job.

mod alert_gate;
mod alerts_model;
mod alerts_service;
mod alerts_traits;
mod budget_evaluator;
mod expense_aggregator;
mod month_window;


pub use alert_gate::is_eligible;
pub use alerts_model::{
    BudgetAlert, BudgetAlertOutcome, BudgetAlertRunSummary, BudgetAlertSettings,
    DEFAULT_ALERT_CONCURRENCY,
};
pub use alerts_service::BudgetAlertService;
pub use alerts_traits::{BudgetAlertNotifierTrait, BudgetAlertServiceTrait};
pub use budget_evaluator::{percentage_used, remaining, should_alert, ALERT_THRESHOLD_PERCENT};
pub use expense_aggregator::ExpenseAggregator;
pub use month_window::{current_month_start, current_month_window, is_new_month, MonthWindow};
