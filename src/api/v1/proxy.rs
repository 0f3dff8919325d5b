//! Image proxy endpoint handler

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::state::AppState;
use crate::api::types::{ApiError, ProxyQuery};

/// Long-lived client caching; proxied images are immutable in practice
const CACHE_CONTROL_VALUE: &str = "public, max-age=31536000";

/// GET /v1/proxy-image?url=
///
/// Re-serves a third-party image with its original content type so the
/// browser can display it without cross-origin restrictions.
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(params): Query<ProxyQuery>,
) -> Result<Response, ApiError> {
    let image = state.image_proxy.fetch(&params.url).await?;

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type.as_str()),
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
        ],
        image.bytes,
    )
        .into_response())
}
