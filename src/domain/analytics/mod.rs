pub mod entities;
pub mod format;
pub mod section;
pub mod services;
pub mod state;
pub mod value_objects;

pub use entities::*;
pub use section::Section;
pub use services::{
    ChartPoint, ChartShapingService, DetailRow, NamedValue, PerformanceBar, StatisticsGroup, statistics_groups,
};
pub use state::{AnalyticsState, OverviewBatch, SymbolBatch};
pub use value_objects::{ChartType, Period, Selection, Symbol};
