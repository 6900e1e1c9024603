use leptos::*;
use wasm_bindgen::prelude::*;

use crate::config::AppConfig;
use crate::domain::logging::LogComponent;

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Wire logging and config, then mount the dashboard.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let (config, problem) = AppConfig::from_document();

    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));
    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new(config.log_level)));

    if let Some(problem) = problem {
        crate::log_warn!(LogComponent::Presentation("Initialize"), "⚠️ {problem}");
    }
    crate::log_info!(
        LogComponent::Presentation("Initialize"),
        "🚀 Portfolio Optimizer Pro starting (API {})",
        config.api_base_url
    );

    mount_to_body(move || view! { <app::App config=config.clone()/> });
}
