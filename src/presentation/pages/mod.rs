pub mod analytics;
pub mod home;
pub mod not_found;
pub mod optimize;

pub use analytics::AnalyticsPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use optimize::OptimizePage;
