//! Topic expansion endpoint handler

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, TopicsRequest};
use crate::domain::ExpansionResult;

/// POST /v1/topics
///
/// Resolves a topic change: cache-first, live enrichment on a miss. The
/// request may carry the currently rendered neighbors so their images can be
/// reused when the user swipes to one of them.
pub async fn resolve_topics(
    State(state): State<AppState>,
    Json(request): Json<TopicsRequest>,
) -> Result<Json<ExpansionResult>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        query = %request.query,
        has_neighbors = request.current_related_topics.is_some(),
        "Processing topic expansion request"
    );

    let result = state
        .navigation_service
        .resolve_topic(&request.query, request.current_related_topics.as_deref())
        .await?;

    Ok(Json(result))
}
