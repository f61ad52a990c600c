use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use moneymap_core::budgets::CurrentBudget;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Identity-provider user id, set by the authenticating proxy in front of the server.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentBudgetQuery {
    account_id: Option<String>,
}

fn external_user_id(headers: &HeaderMap) -> ApiResult<&str> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))
}

async fn get_current_budget(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<CurrentBudgetQuery>,
) -> ApiResult<Json<CurrentBudget>> {
    let external_id = external_user_id(&headers)?;
    let user = state
        .user_repository
        .get_by_external_id(external_id)?
        .ok_or(ApiError::NotFound)?;

    let account_id = query.account_id.as_deref().filter(|id| !id.is_empty());
    let current = state.budget_service.get_current_budget(&user.id, account_id)?;
    Ok(Json(current))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/budget/current", get(get_current_budget))
}
