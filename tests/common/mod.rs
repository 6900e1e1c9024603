#![allow(dead_code)]

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use portfolio_optimizer_wasm::config::AppConfig;
use portfolio_optimizer_wasm::domain::errors::{ApiError, ApiResult};
use portfolio_optimizer_wasm::infrastructure::http::{AnalyticsApiClient, HttpResponse, HttpTransport};
use std::cell::RefCell;
use std::rc::Rc;

pub const BASE: &str = "http://api.test/api/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub url: String,
    pub body: Option<String>,
}

#[derive(Default)]
struct Inner {
    routes: RefCell<Vec<(String, ApiResult<HttpResponse>)>>,
    gates: RefCell<Vec<(String, oneshot::Receiver<()>)>>,
    requests: RefCell<Vec<Recorded>>,
}

/// Scripted transport. Answers by the first route whose fragment occurs in
/// the URL, 404 otherwise. Clones share the script and the request log.
#[derive(Clone, Default)]
pub struct MockTransport(Rc<Inner>);

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, fragment: &str, status: u16, body: &str) -> Self {
        self.0
            .routes
            .borrow_mut()
            .push((fragment.to_string(), Ok(HttpResponse::new(status, body))));
        self
    }

    pub fn fail(self, fragment: &str, error: ApiError) -> Self {
        self.0.routes.borrow_mut().push((fragment.to_string(), Err(error)));
        self
    }

    /// Hold the next matching request until the returned sender fires.
    pub fn gate(&self, fragment: &str) -> oneshot::Sender<()> {
        let (release, wait) = oneshot::channel();
        self.0.gates.borrow_mut().push((fragment.to_string(), wait));
        release
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.0.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.url).collect()
    }

    pub fn count(&self, fragment: &str) -> usize {
        self.urls().iter().filter(|url| url.contains(fragment)).count()
    }

    fn answer(&self, method: &'static str, url: String, body: Option<String>) -> LocalBoxFuture<'static, ApiResult<HttpResponse>> {
        self.0.requests.borrow_mut().push(Recorded {
            method,
            url: url.clone(),
            body,
        });
        let gate = {
            let mut gates = self.0.gates.borrow_mut();
            gates
                .iter()
                .position(|(fragment, _)| url.contains(fragment.as_str()))
                .map(|idx| gates.remove(idx).1)
        };
        let response = self
            .0
            .routes
            .borrow()
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| Ok(HttpResponse::new(404, "")));
        Box::pin(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            response
        })
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: String) -> LocalBoxFuture<'_, ApiResult<HttpResponse>> {
        self.answer("GET", url, None)
    }

    fn post_json(&self, url: String, body: String) -> LocalBoxFuture<'_, ApiResult<HttpResponse>> {
        self.answer("POST", url, Some(body))
    }
}

pub fn config() -> AppConfig {
    AppConfig::default().with_api_base_url(BASE)
}

pub fn client(transport: &MockTransport) -> AnalyticsApiClient<MockTransport> {
    AnalyticsApiClient::new(transport.clone(), &config())
}

pub const STOCKS_SUMMARY: &str = r#"{
    "total_stocks": 3,
    "sectors": {"Banques": 2, "Télécommunications": 1},
    "market_cap_statistics": {"total": 3, "sum": 3.0e11, "mean": 1.0e11, "median": 9.0e10, "min": 5.0e10, "max": 1.6e11},
    "most_traded_stocks": [
        {"symbol": "iam", "name": "Maroc Telecom", "total_volume": 120000},
        {"symbol": "ATW", "name": "Attijariwafa Bank", "total_volume": 90000},
        {"symbol": "IAM", "name": "Maroc Telecom", "total_volume": 1}
    ]
}"#;

pub const OPCVM_SUMMARY: &str = r#"{
    "total_opcvm": 2,
    "categories": {"Actions": 1, "Obligations": 1},
    "best_performers_1y": [
        {"id": 7, "name": "CDG Actions Croissance", "performance": 18.4},
        {"id": "x9", "name": "Upline Oblig", "performance": -2.1}
    ]
}"#;

pub const MARKET_OVERVIEW: &str = r#"{
    "market_statistics": {"total_listed_stocks": 76, "stocks_with_price_data": 70, "coverage_percentage": 92.1},
    "trading_activity": {"last_30_days_volume": 45000000, "average_daily_volume": 1500000}
}"#;

pub fn statistics(symbol: &str, days: u32) -> String {
    format!(
        r#"{{
            "symbol": "{symbol}",
            "period_days": {days},
            "data_points": 21,
            "price_statistics": {{
                "open": {{"mean": 491.0}},
                "close": {{"mean": 492.4, "std": 7.1, "min": 480, "max": 504}},
                "high": {{}},
                "low": {{}}
            }},
            "volume_statistics": {{"mean": 1240000, "std": 310000, "min": 800, "max": 2400000, "total": 26040000}},
            "returns_statistics": {{
                "mean_daily": 0.0024,
                "std_daily": 0.0116,
                "volatility_annualized": 0.1834,
                "total_return": 5.0,
                "sharpe_ratio": 1.27
            }},
            "price_trend": {{"first_price": 480, "last_price": 504, "change": 24, "change_percent": 5.0}},
            "date_range": {{"start": "2024-03-04T00:00:00", "end": "2024-04-01T00:00:00"}}
        }}"#
    )
}

pub fn chart(symbol: &str) -> String {
    format!(
        r#"{{
            "symbol": "{symbol}",
            "chart_type": "line",
            "data_points": 3,
            "data": [
                {{"date": "2024-03-04T00:00:00", "price": 480.0, "volume": 1200}},
                {{"date": "2024-03-05T00:00:00", "price": 492.5, "volume": 800}},
                {{"date": "2024-03-06T00:00:00", "price": 504.0, "volume": 950}}
            ]
        }}"#
    )
}

pub const OPTIMIZATION: &str = r#"{
    "weights": [0.25, 0.45, 0.30],
    "expected_return": 0.112,
    "volatility": 0.154,
    "sharpe_ratio": 0.61,
    "cvar": null,
    "method_used": "mean_variance"
}"#;
