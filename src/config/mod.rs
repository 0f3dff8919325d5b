mod app_config;

pub use app_config::{
    AppConfig, CacheBackend, CacheConfig, HttpConfig, LogFormat, LoggingConfig, OpenAiConfig,
    ProvidersConfig, SerperConfig, ServerConfig,
};
