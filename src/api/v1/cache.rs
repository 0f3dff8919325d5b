//! Query cache endpoints (history view and explicit clear)

use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::CacheEntry;

/// GET /v1/cache
pub async fn list_cache(
    State(state): State<AppState>,
) -> Result<Json<Vec<CacheEntry>>, ApiError> {
    let entries = state.query_cache.list().await?;
    Ok(Json(entries))
}

/// DELETE /v1/cache
pub async fn clear_cache(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.query_cache.clear().await?;
    info!("Query cache cleared");
    Ok(StatusCode::NO_CONTENT)
}
