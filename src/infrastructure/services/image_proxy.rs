//! Cross-origin image proxy
//!
//! Fetches a third-party image and re-serves it so the browser front end can
//! display it without cross-origin restrictions.

use std::sync::Arc;

use bytes::Bytes;

use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

/// Some image hosts reject requests without a browser-like user agent
const PROXY_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const FALLBACK_CONTENT_TYPE: &str = "image/jpeg";

/// A fetched image ready to re-serve
#[derive(Debug, Clone)]
pub struct ProxiedImage {
    pub bytes: Bytes,
    pub content_type: String,
}

#[derive(Debug)]
pub struct ImageProxyService {
    client: Arc<dyn HttpClientTrait>,
}

impl ImageProxyService {
    pub fn new(client: Arc<dyn HttpClientTrait>) -> Self {
        Self { client }
    }

    /// Fetches the image at `url`, preserving the upstream content type.
    ///
    /// When the upstream omits the content type it is guessed from the URL,
    /// falling back to `image/jpeg`.
    pub async fn fetch(&self, url: &str) -> Result<ProxiedImage, DomainError> {
        if url.trim().is_empty() {
            return Err(DomainError::validation("Image URL is required"));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(DomainError::validation(
                "Image URL must be an absolute http(s) URL",
            ));
        }

        let headers = vec![("User-Agent", PROXY_USER_AGENT)];
        let (bytes, content_type) = self.client.get_bytes(url, headers).await?;

        let content_type = content_type.unwrap_or_else(|| guess_content_type(url));

        Ok(ProxiedImage {
            bytes,
            content_type,
        })
    }
}

fn guess_content_type(url: &str) -> String {
    let path = url
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    #[tokio::test]
    async fn test_fetch_preserves_upstream_content_type() {
        let client = MockHttpClient::new().with_bytes(
            "https://img.example.com/a",
            &b"png bytes"[..],
            Some("image/png"),
        );
        let proxy = ImageProxyService::new(Arc::new(client));

        let image = proxy.fetch("https://img.example.com/a").await.unwrap();

        assert_eq!(image.content_type, "image/png");
        assert_eq!(&image.bytes[..], b"png bytes");
    }

    #[tokio::test]
    async fn test_fetch_guesses_content_type_from_url() {
        let client = MockHttpClient::new().with_bytes(
            "https://img.example.com/a.webp?w=100",
            &b"bytes"[..],
            None,
        );
        let proxy = ImageProxyService::new(Arc::new(client));

        let image = proxy
            .fetch("https://img.example.com/a.webp?w=100")
            .await
            .unwrap();

        assert_eq!(image.content_type, "image/webp");
    }

    #[tokio::test]
    async fn test_fetch_defaults_to_jpeg_when_unguessable() {
        let client =
            MockHttpClient::new().with_bytes("https://img.example.com/raw", &b"bytes"[..], None);
        let proxy = ImageProxyService::new(Arc::new(client));

        let image = proxy.fetch("https://img.example.com/raw").await.unwrap();

        assert_eq!(image.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_fetch_rejects_missing_url() {
        let proxy = ImageProxyService::new(Arc::new(MockHttpClient::new()));

        let err = proxy.fetch("  ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_fetch_rejects_relative_url() {
        let proxy = ImageProxyService::new(Arc::new(MockHttpClient::new()));

        let err = proxy.fetch("/images/a.png").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_fetch_surfaces_upstream_failure() {
        let client = MockHttpClient::new().with_error("https://img.example.com/a.png", "HTTP 404");
        let proxy = ImageProxyService::new(Arc::new(client));

        let err = proxy.fetch("https://img.example.com/a.png").await.unwrap_err();
        assert!(matches!(err, DomainError::Provider { .. }));
    }
}
