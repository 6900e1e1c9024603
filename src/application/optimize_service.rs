use super::request_tracker::RequestTracker;
use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::optimization::{OptimizationOutcome, OptimizeForm};
use crate::infrastructure::http::{AnalyticsApiClient, HttpTransport};

/// Submits the optimize form. A resubmission makes the previous answer stale.
pub struct OptimizeService<T> {
    client: AnalyticsApiClient<T>,
    submissions: RequestTracker,
}

impl<T: HttpTransport> OptimizeService<T> {
    pub fn new(client: AnalyticsApiClient<T>) -> Self {
        Self {
            client,
            submissions: RequestTracker::new(),
        }
    }

    pub fn client(&self) -> &AnalyticsApiClient<T> {
        &self.client
    }

    /// Validate the form and run the optimization.
    ///
    /// Invalid input fails with [`ApiError::Validation`] without any request.
    /// An answer overtaken by a newer submission fails with
    /// [`ApiError::Cancelled`].
    pub async fn submit(&self, form: &OptimizeForm) -> ApiResult<OptimizationOutcome> {
        let request = form.to_request().inspect_err(|error| {
            get_logger().warn(
                LogComponent::Application("OptimizeService"),
                &format!("⚠️ Rejected optimize form: {error}"),
            );
        })?;

        let ticket = self.submissions.begin();
        let response = self.client.optimize(&request).await;
        if !self.submissions.is_current(ticket.generation) {
            return Err(ApiError::Cancelled);
        }

        match response {
            Ok(response) => {
                get_logger().info(
                    LogComponent::Application("OptimizeService"),
                    &format!(
                        "✅ {} portfolio over {} symbols: return {:.4}, volatility {:.4}",
                        response.method_used,
                        request.symbols.len(),
                        response.expected_return,
                        response.volatility
                    ),
                );
                Ok(OptimizationOutcome {
                    symbols: request.symbols,
                    response,
                })
            }
            Err(error) => {
                get_logger().error(
                    LogComponent::Application("OptimizeService"),
                    &format!("❌ Optimization failed: {error}"),
                );
                Err(error)
            }
        }
    }

    pub fn cancel_pending(&self) {
        self.submissions.cancel();
    }
}
