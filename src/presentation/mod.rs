//! Leptos pages and widgets.

pub mod components;
pub mod pages;
pub mod router;

use leptos::use_context;

use crate::config::AppConfig;
use crate::infrastructure::http::{AnalyticsApiClient, GlooTransport};

/// Config provided by [`App`](crate::app::App), or defaults outside it.
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_default()
}

pub fn api_client(config: &AppConfig) -> AnalyticsApiClient<GlooTransport> {
    AnalyticsApiClient::new(GlooTransport::new(config.request_timeout_ms), config)
}
