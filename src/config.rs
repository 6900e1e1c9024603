use serde::Deserialize;

use crate::domain::analytics::value_objects::DEFAULT_SYMBOL;
use crate::domain::analytics::{Period, Selection, Symbol};
use crate::domain::logging::LogLevel;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 15_000;

/// Meta tag holding a JSON object with any subset of the config fields.
pub const CONFIG_META: &str = "app-config";
/// Meta tag overriding only the API base URL.
pub const API_BASE_META: &str = "api-base-url";

/// Runtime settings, resolved once at startup and provided to every page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u32,
    pub default_symbol: String,
    pub default_period: Period,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("PORTFOLIO_API_BASE")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            default_symbol: DEFAULT_SYMBOL.to_string(),
            default_period: Period::default(),
            log_level: if cfg!(debug_assertions) { LogLevel::Debug } else { LogLevel::Info },
        }
    }
}

impl AppConfig {
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn with_default_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.default_symbol = symbol.into();
        self
    }

    pub fn with_default_period(mut self, period: Period) -> Self {
        self.default_period = period;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Resolve the config from host-page overrides. `meta` looks up a
    /// `<meta name=...>` tag's content.
    ///
    /// Returns the config plus any override that was present but unreadable,
    /// so the caller can log it once a logger exists.
    pub fn resolve(meta: impl Fn(&str) -> Option<String>) -> (Self, Option<String>) {
        let mut problem = None;
        let mut config = match meta(CONFIG_META) {
            Some(raw) => serde_json::from_str::<AppConfig>(&raw).unwrap_or_else(|e| {
                problem = Some(format!("ignoring malformed '{CONFIG_META}' meta tag: {e}"));
                AppConfig::default()
            }),
            None => AppConfig::default(),
        };
        if let Some(url) = meta(API_BASE_META).filter(|url| !url.trim().is_empty()) {
            config = config.with_api_base_url(url.trim());
        }
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        (config, problem)
    }

    /// Read overrides from the current document's `<meta>` tags.
    pub fn from_document() -> (Self, Option<String>) {
        Self::resolve(|name| {
            web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| {
                    document
                        .query_selector(&format!("meta[name=\"{name}\"]"))
                        .ok()
                        .flatten()
                })
                .and_then(|element| element.get_attribute("content"))
        })
    }

    /// Starting selection of the analytics page. Falls back to the built-in
    /// default symbol when the configured one is invalid.
    pub fn initial_selection(&self) -> Selection {
        let symbol = Symbol::new(&self.default_symbol).unwrap_or_default();
        Selection::new(symbol, self.default_period)
    }

    /// Backend origin, i.e. the base URL without its path.
    pub fn api_origin(&self) -> &str {
        let url = self.api_base_url.as_str();
        let after_scheme = url.find("://").map(|idx| idx + 3).unwrap_or(0);
        match url[after_scheme..].find('/') {
            Some(idx) => &url[..after_scheme + idx],
            None => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn metas(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let (config, problem) = AppConfig::resolve(metas(&[]));
        assert!(problem.is_none());
        assert_eq!(config.default_symbol, "ATW");
        assert_eq!(config.default_period, Period::OneMonth);
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn base_url_meta_wins_over_json_config() {
        let (config, _) = AppConfig::resolve(metas(&[
            (CONFIG_META, r#"{"api_base_url": "http://json/api", "request_timeout_ms": 500}"#),
            (API_BASE_META, "https://prod.example.ma/api/v1/"),
        ]));
        assert_eq!(config.api_base_url, "https://prod.example.ma/api/v1");
        assert_eq!(config.request_timeout_ms, 500);
    }

    #[test]
    fn json_config_accepts_partial_objects() {
        let (config, _) = AppConfig::resolve(metas(&[(
            CONFIG_META,
            r#"{"default_period": "1Y", "log_level": "warn"}"#,
        )]));
        assert_eq!(config.default_period, Period::OneYear);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn malformed_json_config_is_reported_not_fatal() {
        let (config, problem) = AppConfig::resolve(metas(&[(CONFIG_META, "{nope")]));
        assert_eq!(config.default_symbol, "ATW");
        assert!(problem.unwrap().contains("app-config"));
    }

    #[test]
    fn initial_selection_falls_back_on_bad_symbol() {
        let config = AppConfig::default()
            .with_default_symbol("bad symbol!")
            .with_default_period(Period::ThreeMonths);
        let selection = config.initial_selection();
        assert_eq!(selection.symbol.value(), "ATW");
        assert_eq!(selection.period.days(), 90);
    }

    #[test]
    fn origin_strips_path() {
        let config = AppConfig::default().with_api_base_url("http://localhost:8000/api/v1");
        assert_eq!(config.api_origin(), "http://localhost:8000");
        let bare = AppConfig::default().with_api_base_url("https://host.ma");
        assert_eq!(bare.api_origin(), "https://host.ma");
    }
}
