//! Domain layer: response schemas, page state, validation and logging.
//! Nothing here touches the browser.

pub mod analytics;
pub mod errors;
pub mod logging;
pub mod optimization;
