use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use moneymap_core::alerts::BudgetAlertRunSummary;

use crate::{
    error::{ApiError, ApiResult},
    jobs::try_run_budget_alerts,
    main_lib::AppState,
};

/// Runs the budget alert check now and reports what it did.
async fn trigger_budget_alerts(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetAlertRunSummary>> {
    match try_run_budget_alerts(&state).await {
        Some(result) => Ok(Json(result?)),
        None => Err(ApiError::Conflict(
            "A budget alert check is already running".to_string(),
        )),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/jobs/budget-alerts", post(trigger_budget_alerts))
}
