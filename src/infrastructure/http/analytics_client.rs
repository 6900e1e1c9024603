use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{HttpResponse, HttpTransport};
use crate::config::AppConfig;
use crate::domain::analytics::{
    ChartData, ChartType, MarketOverview, OpcvmSummary, Period, StockStatistics, StocksSummary,
    Symbol,
};
use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::optimization::{OptimizationRequest, OptimizationResponse};

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Typed client for the portfolio backend.
///
/// One call, one request: no retries, no caching.
pub struct AnalyticsApiClient<T> {
    transport: T,
    base_url: String,
    origin: String,
}

impl<T: HttpTransport> AnalyticsApiClient<T> {
    pub fn new(transport: T, config: &AppConfig) -> Self {
        Self {
            transport,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            origin: config.api_origin().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}{path}?k=v&...` with percent-encoded query values.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        for (idx, (key, value)) in query.iter().enumerate() {
            url.push(if idx == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn symbol_path(symbol: &Symbol, tail: &str) -> String {
        format!(
            "/analytics/stocks/{}/{}",
            urlencoding::encode(symbol.value()),
            tail
        )
    }

    pub fn stock_statistics_url(&self, symbol: &Symbol, period: Period) -> String {
        self.url(
            &Self::symbol_path(symbol, "statistics"),
            &[("days", period.days().to_string())],
        )
    }

    pub fn chart_data_url(&self, symbol: &Symbol, chart_type: ChartType, period: Period) -> String {
        self.url(
            &Self::symbol_path(symbol, "chart-data"),
            &[
                ("chart_type", chart_type.as_ref().to_string()),
                ("days", period.days().to_string()),
            ],
        )
    }

    pub async fn stocks_summary(&self) -> ApiResult<StocksSummary> {
        self.get_json(self.url("/analytics/stocks/summary", &[])).await
    }

    pub async fn opcvm_summary(&self) -> ApiResult<OpcvmSummary> {
        self.get_json(self.url("/analytics/opcvm/summary", &[])).await
    }

    pub async fn market_overview(&self) -> ApiResult<MarketOverview> {
        self.get_json(self.url("/analytics/market/overview", &[])).await
    }

    pub async fn stock_statistics(&self, symbol: &Symbol, period: Period) -> ApiResult<StockStatistics> {
        self.get_json(self.stock_statistics_url(symbol, period)).await
    }

    pub async fn chart_data(
        &self,
        symbol: &Symbol,
        chart_type: ChartType,
        period: Period,
    ) -> ApiResult<ChartData> {
        self.get_json(self.chart_data_url(symbol, chart_type, period)).await
    }

    /// Validates locally, then posts to `/optimize/{method}`.
    pub async fn optimize(&self, request: &OptimizationRequest) -> ApiResult<OptimizationResponse> {
        request.validate()?;
        let url = self.url(&format!("/optimize/{}", request.method.path_segment()), &[]);
        let body = serde_json::to_string(request).map_err(|e| ApiError::Decode(e.to_string()))?;

        get_logger().info(
            LogComponent::Infrastructure("ApiClient"),
            &format!("📤 POST {url} ({} symbols)", request.symbols.len()),
        );
        let response = self.transport.post_json(url.clone(), body).await?;
        Self::decode(&url, response)
    }

    /// Backend liveness. Lives at the origin root, outside the versioned prefix.
    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.get_json(format!("{}/api/health", self.origin)).await
    }

    async fn get_json<R: DeserializeOwned>(&self, url: String) -> ApiResult<R> {
        get_logger().debug(
            LogComponent::Infrastructure("ApiClient"),
            &format!("📡 GET {url}"),
        );
        let response = self.transport.get(url.clone()).await?;
        Self::decode(&url, response)
    }

    fn decode<R: DeserializeOwned>(url: &str, response: HttpResponse) -> ApiResult<R> {
        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
                url: url.to_string(),
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(format!("{url}: {e}")))
    }
}
