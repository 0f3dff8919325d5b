//! Infrastructure layer - provider clients, stores and composed services

pub mod cache;
pub mod http_client;
pub mod image_search;
pub mod llm;
pub mod logging;
pub mod services;

pub use http_client::{HttpClient, HttpClientTrait};
