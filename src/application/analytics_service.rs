use futures::future::Abortable;
use futures::join;

use super::request_tracker::RequestTracker;
use crate::domain::analytics::{ChartType, OverviewBatch, Selection, SymbolBatch};
use crate::domain::errors::ApiResult;
use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::http::{AnalyticsApiClient, HttpTransport};

/// Drives the analytics page fetches.
///
/// The bulk batch runs once per mount. Per-symbol batches go through a
/// [`RequestTracker`], so only the most recently started one can commit.
pub struct AnalyticsService<T> {
    client: AnalyticsApiClient<T>,
    symbol_requests: RequestTracker,
}

impl<T: HttpTransport> AnalyticsService<T> {
    pub fn new(client: AnalyticsApiClient<T>) -> Self {
        Self {
            client,
            symbol_requests: RequestTracker::new(),
        }
    }

    /// Fetch the three bulk sections concurrently and wait for all of them.
    pub async fn load_overview(&self) -> OverviewBatch {
        get_logger().info(
            LogComponent::Application("AnalyticsService"),
            "📊 Loading market overview",
        );

        let (stocks_summary, opcvm_summary, market_overview) = join!(
            self.client.stocks_summary(),
            self.client.opcvm_summary(),
            self.client.market_overview(),
        );

        report("stocks summary", &stocks_summary);
        report("OPCVM summary", &opcvm_summary);
        report("market overview", &market_overview);

        OverviewBatch {
            stocks_summary,
            opcvm_summary,
            market_overview,
        }
    }

    /// Fetch statistics and chart series for `selection`.
    ///
    /// Returns `None` when a newer call (or [`cancel_pending`]) superseded this
    /// one before it settled.
    ///
    /// [`cancel_pending`]: Self::cancel_pending
    pub async fn load_symbol(&self, selection: Selection) -> Option<SymbolBatch> {
        let ticket = self.symbol_requests.begin();
        get_logger().info(
            LogComponent::Application("AnalyticsService"),
            &format!(
                "🔎 Loading {} over {} days (batch #{})",
                selection.symbol,
                selection.period.days(),
                ticket.generation
            ),
        );

        let fetch = async {
            join!(
                self.client.stock_statistics(&selection.symbol, selection.period),
                self.client
                    .chart_data(&selection.symbol, ChartType::Line, selection.period),
            )
        };

        let (statistics, chart) = match Abortable::new(fetch, ticket.registration).await {
            Ok(results) => results,
            Err(_aborted) => {
                get_logger().debug(
                    LogComponent::Application("AnalyticsService"),
                    &format!("Batch #{} for {} aborted", ticket.generation, selection.symbol),
                );
                return None;
            }
        };

        if !self.symbol_requests.is_current(ticket.generation) {
            get_logger().debug(
                LogComponent::Application("AnalyticsService"),
                &format!("Batch #{} for {} is stale, dropping", ticket.generation, selection.symbol),
            );
            return None;
        }

        report("statistics", &statistics);
        report("chart data", &chart);

        Some(SymbolBatch {
            selection,
            statistics,
            chart,
        })
    }

    /// Abort the in-flight per-symbol batch, e.g. when the page unmounts.
    pub fn cancel_pending(&self) {
        self.symbol_requests.cancel();
    }
}

fn report<V>(section: &str, result: &ApiResult<V>) {
    if let Err(error) = result {
        get_logger().error(
            LogComponent::Application("AnalyticsService"),
            &format!("❌ Failed to load {section}: {error}"),
        );
    }
}
