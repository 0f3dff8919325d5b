use serde::{Deserialize, Serialize};

/// Raster extensions the front end can render directly
const ALLOWED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".webp", ".gif"];

/// A normalized image record from an image-search provider.
///
/// Fields the provider omitted are empty/zero rather than absent; ordering of
/// image lists is always the provider's relevance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub thumbnail: String,
    pub source: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Image {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            thumbnail: String::new(),
            source: String::new(),
            title: String::new(),
            width: 0,
            height: 0,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Invariant check: absolute http(s) URL pointing at a known raster
    /// extension. Records failing this are dropped before they reach the UI.
    pub fn has_displayable_url(&self) -> bool {
        is_displayable_url(&self.url)
    }
}

/// Checks the image-URL invariant. The query string and fragment are ignored
/// for the extension check.
pub fn is_displayable_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();

    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return false;
    }

    let path = lower
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    ALLOWED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
