pub mod analytics_service;
pub mod optimize_service;
pub mod request_tracker;

pub use analytics_service::AnalyticsService;
pub use optimize_service::OptimizeService;
pub use request_tracker::{RequestTicket, RequestTracker};
