//! HTTP plumbing: a swappable transport plus the typed analytics client.

pub mod analytics_client;

pub use analytics_client::{AnalyticsApiClient, HealthStatus};

use futures::future::{Either, LocalBoxFuture, select};
use futures::pin_mut;
use std::future::Future;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::logging::{LogComponent, get_logger};

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests and hands back whatever the server answered.
///
/// Non-2xx statuses are not errors at this level; only a request that never
/// completes is.
pub trait HttpTransport {
    fn get(&self, url: String) -> LocalBoxFuture<'_, ApiResult<HttpResponse>>;

    fn post_json(&self, url: String, body: String) -> LocalBoxFuture<'_, ApiResult<HttpResponse>>;
}

/// Browser `fetch` transport via gloo-net, bounded by a timeout.
#[derive(Debug, Clone)]
pub struct GlooTransport {
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    async fn send(&self, request: Request) -> ApiResult<HttpResponse> {
        let url = request.url();
        let exchange = async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;
            Ok(HttpResponse { status, body })
        };
        within_deadline(exchange, TimeoutFuture::new(self.timeout_ms), &url, self.timeout_ms).await
    }
}

/// Races `exchange` against `timer`; the timer firing first is a `Network` error.
async fn within_deadline<E, T>(exchange: E, timer: T, url: &str, timeout_ms: u32) -> ApiResult<HttpResponse>
where
    E: Future<Output = ApiResult<HttpResponse>>,
    T: Future<Output = ()>,
{
    pin_mut!(exchange, timer);
    match select(exchange, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => {
            get_logger().warn(
                LogComponent::Infrastructure("Http"),
                &format!("⏱️ {url} timed out after {timeout_ms} ms"),
            );
            Err(ApiError::Network(format!("request timed out after {timeout_ms} ms")))
        }
    }
}

impl HttpTransport for GlooTransport {
    fn get(&self, url: String) -> LocalBoxFuture<'_, ApiResult<HttpResponse>> {
        Box::pin(async move {
            let request = Request::get(&url)
                .header("Accept", "application/json")
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            self.send(request).await
        })
    }

    fn post_json(&self, url: String, body: String) -> LocalBoxFuture<'_, ApiResult<HttpResponse>> {
        Box::pin(async move {
            let request = Request::post(&url)
                .header("Accept", "application/json")
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| ApiError::Network(e.to_string()))?;
            self.send(request).await
        })
    }
}
