mod common;

use common::{MockTransport, OPTIMIZATION, client, config};
use futures::executor::block_on;
use portfolio_optimizer_wasm::domain::analytics::{ChartType, Period, Symbol};
use portfolio_optimizer_wasm::domain::errors::{ApiError, ValidationError};
use portfolio_optimizer_wasm::domain::optimization::{OptimizationMethod, OptimizationRequest, parse_symbols};
use portfolio_optimizer_wasm::infrastructure::http::AnalyticsApiClient;

#[test]
fn symbol_urls_carry_days_and_chart_type() {
    let client = client(&MockTransport::new());
    let symbol = Symbol::new("cdm").unwrap();

    assert_eq!(
        client.stock_statistics_url(&symbol, Period::OneYear),
        "http://api.test/api/v1/analytics/stocks/CDM/statistics?days=365"
    );
    assert_eq!(
        client.chart_data_url(&symbol, ChartType::Candlestick, Period::ThreeYears),
        "http://api.test/api/v1/analytics/stocks/CDM/chart-data?chart_type=candlestick&days=1095"
    );
}

#[test]
fn query_values_are_percent_encoded() {
    let client = client(&MockTransport::new());
    assert_eq!(
        client.url("/search", &[("q", "a b&c".to_string())]),
        "http://api.test/api/v1/search?q=a%20b%26c"
    );
}

#[test]
fn trailing_slash_on_base_url_is_ignored() {
    let config = config().with_api_base_url("http://api.test/api/v1/");
    let client = AnalyticsApiClient::new(MockTransport::new(), &config);
    assert_eq!(client.base_url(), "http://api.test/api/v1");
}

#[test]
fn non_success_status_is_an_http_error() {
    let transport = MockTransport::new().respond("/market/overview", 503, "unavailable");
    let error = block_on(client(&transport).market_overview()).unwrap_err();

    assert_eq!(error.status(), Some(503));
    assert_eq!(
        error,
        ApiError::Http {
            status: 503,
            url: "http://api.test/api/v1/analytics/market/overview".to_string(),
        }
    );
}

#[test]
fn unexpected_shape_is_a_decode_error() {
    let transport = MockTransport::new().respond("/market/overview", 200, r#"{"trading_activity": {}}"#);
    let error = block_on(client(&transport).market_overview()).unwrap_err();

    match error {
        ApiError::Decode(message) => assert!(message.starts_with("http://api.test/api/v1/analytics/market/overview: ")),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn transport_failures_pass_through() {
    let transport = MockTransport::new().fail("/stocks/summary", ApiError::Network("offline".into()));
    let error = block_on(client(&transport).stocks_summary()).unwrap_err();
    assert_eq!(error, ApiError::Network("offline".into()));
}

#[test]
fn optimize_posts_to_the_method_endpoint() {
    let transport = MockTransport::new().respond("/optimize/cvar", 200, OPTIMIZATION);
    let request = OptimizationRequest::new(parse_symbols("ATW, IAM, BCP").unwrap(), OptimizationMethod::Cvar)
        .with_weight_bounds(0.05, 0.6);

    let response = block_on(client(&transport).optimize(&request)).unwrap();
    assert_eq!(response.weights.len(), 3);
    assert_eq!(response.cvar, None);

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "POST");
    assert_eq!(sent[0].url, "http://api.test/api/v1/optimize/cvar");
    let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["symbols"], serde_json::json!(["ATW", "IAM", "BCP"]));
    assert_eq!(body["method"], "cvar");
    assert_eq!(body["max_weight"], 0.6);
}

#[test]
fn invalid_optimization_never_reaches_the_network() {
    let transport = MockTransport::new();
    let request = OptimizationRequest::new(Vec::new(), OptimizationMethod::MeanVariance);

    let error = block_on(client(&transport).optimize(&request)).unwrap_err();
    assert_eq!(error, ApiError::Validation(ValidationError::NoSymbols));
    assert!(transport.requests().is_empty());
}

#[test]
fn health_lives_at_the_origin() {
    let transport = MockTransport::new().respond("/api/health", 200, r#"{"status": "healthy"}"#);
    let health = block_on(client(&transport).health()).unwrap();

    assert!(health.is_healthy());
    assert_eq!(transport.urls(), vec!["http://api.test/api/health".to_string()]);
}
