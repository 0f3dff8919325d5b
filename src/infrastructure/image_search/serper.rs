use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, Image, ImageSearchProvider};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev";

/// Serper image-search provider
///
/// Maps raw Serper records into the canonical [`Image`] shape; fields the
/// provider omits become empty/zero instead of failing the call. Records are
/// kept in the provider's relevance order.
#[derive(Debug)]
pub struct SerperImageSearch<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> SerperImageSearch<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_SERPER_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn images_url(&self) -> String {
        format!("{}/images", self.base_url)
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Vec<Image>, DomainError> {
        let response: SerperImagesResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("serper", format!("Failed to parse response: {}", e))
        })?;

        Ok(response
            .images
            .into_iter()
            .map(SerperImageRecord::into_image)
            .collect())
    }
}

#[async_trait]
impl<C: HttpClientTrait> ImageSearchProvider for SerperImageSearch<C> {
    async fn search(&self, query: &str) -> Result<Vec<Image>, DomainError> {
        if self.api_key.trim().is_empty() {
            return Err(DomainError::credential(
                "Serper API key is not configured; image search is unavailable",
            ));
        }

        let url = self.images_url();
        let body = serde_json::json!({ "q": query });
        let headers = vec![
            ("X-API-KEY", self.api_key.as_str()),
            ("Content-Type", "application/json"),
        ];

        let response = self.client.post_json(&url, headers, &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "serper"
    }
}

// Serper API types

#[derive(Debug, Deserialize)]
struct SerperImagesResponse {
    #[serde(default)]
    images: Vec<SerperImageRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerperImageRecord {
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    thumbnail_url: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    image_width: u32,
    #[serde(default)]
    image_height: u32,
}

impl SerperImageRecord {
    fn into_image(self) -> Image {
        Image::new(self.image_url)
            .with_thumbnail(self.thumbnail_url)
            .with_source(self.source)
            .with_title(self.title)
            .with_dimensions(self.image_width, self.image_height)
    }
}
