//! Budget alert runs shared by the scheduler and the manual trigger.

use std::sync::Arc;

use tracing::{info_span, Instrument};
use uuid::Uuid;

use moneymap_core::alerts::BudgetAlertRunSummary;
use moneymap_core::errors::{Error, Result};

use crate::main_lib::AppState;

/// Runs the budget alert check unless another run holds the guard.
///
/// Returns `None` when a run is already in progress. The run owns its own
/// task: dropping this future (a timed-out request) leaves it running until
/// every sent alert has been recorded.
pub async fn try_run_budget_alerts(
    state: &Arc<AppState>,
) -> Option<Result<BudgetAlertRunSummary>> {
    let state = state.clone();
    let run = tokio::spawn(async move {
        let _guard = state.alert_run_guard.try_lock().ok()?;
        Some(run_guarded(&state).await)
    });

    match run.await {
        Ok(result) => result,
        Err(e) => Some(Err(Error::Unexpected(format!(
            "Budget alert run did not complete: {}",
            e
        )))),
    }
}

/// Waits for any in-flight run to finish, then runs the check.
pub async fn run_budget_alerts(state: &Arc<AppState>) -> Result<BudgetAlertRunSummary> {
    let _guard = state.alert_run_guard.lock().await;
    run_guarded(state).await
}

async fn run_guarded(state: &Arc<AppState>) -> Result<BudgetAlertRunSummary> {
    let run_id = Uuid::new_v4();
    state
        .budget_alert_service
        .run_budget_alert_check()
        .instrument(info_span!("budget_alert_run", %run_id))
        .await
}
