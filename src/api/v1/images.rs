//! Image search endpoint handler

use axum::extract::{Query, State};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ImagesQuery, Json};
use crate::domain::Image;

/// GET /v1/images?query=
///
/// Standalone image search; an empty result is a valid outcome, provider
/// failures included.
pub async fn search_images(
    State(state): State<AppState>,
    Query(params): Query<ImagesQuery>,
) -> Result<Json<Vec<Image>>, ApiError> {
    if params.query.trim().is_empty() {
        return Err(ApiError::bad_request("Search query is required").with_param("query"));
    }

    info!(query = %params.query, "Searching images");

    let images = state.image_resolver.resolve(&params.query).await;

    Ok(Json(images))
}
