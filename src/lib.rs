//! Wheelhouse
//!
//! Backend for a browser-based topic-exploration wheel:
//! - Topic expansion via a language-model capability with a fixed
//!   structured-output contract
//! - Image resolution via an image-search capability, filtered and
//!   normalized
//! - A durable per-device query cache making repeated queries idempotent
//! - A proxy endpoint re-serving third-party images across origins

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::AppState;
use config::CacheBackend;
use domain::{ImageSearchProvider, QueryCache, TopicExpander};
use infrastructure::cache::{InMemoryQueryCache, SqliteQueryCache};
use infrastructure::http_client::HttpClient;
use infrastructure::image_search::SerperImageSearch;
use infrastructure::llm::OpenAiTopicExpander;
use infrastructure::services::{
    EnrichmentService, ImageProxyService, ImageResolver, NavigationService,
};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let http_client = HttpClient::with_timeout(Duration::from_secs(config.http.timeout_secs));

    let expander = create_topic_expander(config, http_client.clone());
    let search = create_image_search(config, http_client.clone());

    let image_resolver = Arc::new(ImageResolver::new(search));
    let enrichment = Arc::new(EnrichmentService::new(image_resolver.clone(), expander));

    let query_cache = create_query_cache(config).await?;

    let navigation_service = Arc::new(NavigationService::new(query_cache.clone(), enrichment));
    let image_proxy = Arc::new(ImageProxyService::new(Arc::new(http_client)));

    Ok(AppState::new(
        navigation_service,
        image_resolver,
        image_proxy,
        query_cache,
    ))
}

async fn create_query_cache(config: &AppConfig) -> anyhow::Result<Arc<dyn QueryCache>> {
    match config.cache.backend {
        CacheBackend::Sqlite => {
            let cache =
                SqliteQueryCache::open(&config.cache.path, config.cache.max_entries).await?;
            info!(path = %config.cache.path, "Query cache ready");
            Ok(Arc::new(cache))
        }
        CacheBackend::Memory => {
            info!("Using in-memory query cache; entries will not survive restarts");
            Ok(Arc::new(InMemoryQueryCache::new(config.cache.max_entries)))
        }
    }
}

fn create_topic_expander(config: &AppConfig, client: HttpClient) -> Arc<dyn TopicExpander> {
    let openai = &config.providers.openai;
    let api_key = resolve_credential(&openai.api_key, "OPENAI_API_KEY");

    if api_key.is_empty() {
        info!("No OpenAI API key configured; topic expansion will fail until one is set");
    }

    match &openai.base_url {
        Some(url) => {
            info!("Using OpenAI provider with custom base URL: {}", url);
            Arc::new(OpenAiTopicExpander::with_base_url(
                client,
                api_key,
                openai.model.clone(),
                url.clone(),
            ))
        }
        None => Arc::new(OpenAiTopicExpander::new(
            client,
            api_key,
            openai.model.clone(),
        )),
    }
}

fn create_image_search(config: &AppConfig, client: HttpClient) -> Arc<dyn ImageSearchProvider> {
    let serper = &config.providers.serper;
    let api_key = resolve_credential(&serper.api_key, "SERPER_API_KEY");

    if api_key.is_empty() {
        info!("No Serper API key configured; image search will return empty results");
    }

    match &serper.base_url {
        Some(url) => Arc::new(SerperImageSearch::with_base_url(
            client,
            api_key,
            url.clone(),
        )),
        None => Arc::new(SerperImageSearch::new(client, api_key)),
    }
}

/// Config value first (device-local override), bare environment variable as
/// the default
fn resolve_credential(configured: &str, env_var: &str) -> String {
    let configured = configured.trim();

    if !configured.is_empty() {
        return configured.to_string();
    }

    std::env::var(env_var).unwrap_or_default()
}
