//! Application state for shared services

use std::sync::Arc;

use crate::domain::QueryCache;
use crate::infrastructure::services::{ImageProxyService, ImageResolver, NavigationService};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub navigation_service: Arc<NavigationService>,
    pub image_resolver: Arc<ImageResolver>,
    pub image_proxy: Arc<ImageProxyService>,
    pub query_cache: Arc<dyn QueryCache>,
}

impl AppState {
    pub fn new(
        navigation_service: Arc<NavigationService>,
        image_resolver: Arc<ImageResolver>,
        image_proxy: Arc<ImageProxyService>,
        query_cache: Arc<dyn QueryCache>,
    ) -> Self {
        Self {
            navigation_service,
            image_resolver,
            image_proxy,
            query_cache,
        }
    }
}
