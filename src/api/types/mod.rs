//! API request/response types

mod error;
mod json;

use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use json::Json;

use crate::domain::EnrichedTopic;

/// POST /v1/topics request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicsRequest {
    pub query: String,
    /// The neighbors currently rendered around the wheel; lets the backend
    /// reuse their images when the user navigates to one of them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_related_topics: Option<Vec<EnrichedTopic>>,
}

/// GET /v1/images query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesQuery {
    #[serde(default)]
    pub query: String,
}

/// GET /v1/proxy-image query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyQuery {
    #[serde(default)]
    pub url: String,
}
