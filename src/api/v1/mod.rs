//! v1 API endpoints

pub mod cache;
pub mod images;
pub mod proxy;
pub mod topics;

use axum::routing::{get, post};
use axum::Router;

use crate::api::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/topics", post(topics::resolve_topics))
        .route("/images", get(images::search_images))
        .route("/proxy-image", get(proxy::proxy_image))
        .route("/cache", get(cache::list_cache).delete(cache::clear_cache))
}
