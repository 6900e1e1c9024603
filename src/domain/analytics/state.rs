use crate::domain::errors::ApiResult;

use super::entities::{ChartData, MarketOverview, OpcvmSummary, StockStatistics, StocksSummary};
use super::section::Section;
use super::services::{ChartPoint, ChartShapingService, NamedValue, PerformanceBar};
use super::value_objects::{Period, Selection, Symbol};

/// Settled results of the three bulk fetches issued on mount.
#[derive(Debug, Clone)]
pub struct OverviewBatch {
    pub stocks_summary: ApiResult<StocksSummary>,
    pub opcvm_summary: ApiResult<OpcvmSummary>,
    pub market_overview: ApiResult<MarketOverview>,
}

/// Settled results of one per-symbol batch, tagged with the selection it was
/// issued for.
#[derive(Debug, Clone)]
pub struct SymbolBatch {
    pub selection: Selection,
    pub statistics: ApiResult<StockStatistics>,
    pub chart: ApiResult<ChartData>,
}

/// Page-scoped state of the analytics page.
///
/// The bulk sections and the per-symbol sections are written by independent
/// batches and never touch each other's slots.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsState {
    pub stocks_summary: Section<StocksSummary>,
    pub opcvm_summary: Section<OpcvmSummary>,
    pub market_overview: Section<MarketOverview>,
    pub statistics: Section<StockStatistics>,
    pub chart: Section<ChartData>,
    selection: Selection,
    loading: bool,
}

impl AnalyticsState {
    pub fn new(selection: Selection) -> Self {
        Self {
            stocks_summary: Section::Idle,
            opcvm_summary: Section::Idle,
            market_overview: Section::Idle,
            statistics: Section::Idle,
            chart: Section::Idle,
            selection,
            loading: false,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// True while the bulk batch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_overview(&mut self) {
        self.stocks_summary = Section::Loading;
        self.opcvm_summary = Section::Loading;
        self.market_overview = Section::Loading;
        self.loading = true;
    }

    /// Store every outcome of the bulk batch. Loading ends whatever the outcomes.
    pub fn apply_overview(&mut self, batch: OverviewBatch) {
        self.stocks_summary = Section::from_result(batch.stocks_summary);
        self.opcvm_summary = Section::from_result(batch.opcvm_summary);
        self.market_overview = Section::from_result(batch.market_overview);
        self.loading = false;
    }

    /// Returns the new selection, or `None` when the symbol is already selected.
    pub fn select_symbol(&mut self, symbol: Symbol) -> Option<Selection> {
        if self.selection.symbol == symbol {
            return None;
        }
        self.selection = self.selection.with_symbol(symbol);
        Some(self.selection.clone())
    }

    /// Returns the new selection, or `None` when the period is already selected.
    pub fn select_period(&mut self, period: Period) -> Option<Selection> {
        if self.selection.period == period {
            return None;
        }
        self.selection = self.selection.with_period(period);
        Some(self.selection.clone())
    }

    /// Mark the per-symbol sections as loading for the current selection.
    pub fn begin_symbol(&mut self) -> Selection {
        self.statistics = Section::Loading;
        self.chart = Section::Loading;
        self.selection.clone()
    }

    /// Store a per-symbol batch. A batch issued for another selection is
    /// dropped and `false` is returned.
    pub fn apply_symbol(&mut self, batch: SymbolBatch) -> bool {
        if batch.selection != self.selection {
            return false;
        }
        self.statistics = Section::from_result(batch.statistics);
        self.chart = Section::from_result(batch.chart);
        true
    }

    pub fn sector_slices(&self) -> Vec<NamedValue> {
        ChartShapingService::sector_slices(self.stocks_summary.loaded())
    }

    pub fn performer_bars(&self) -> Vec<PerformanceBar> {
        ChartShapingService::performer_bars(
            self.opcvm_summary
                .loaded()
                .map(|summary| summary.best_performers_1y.as_slice()),
        )
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        ChartShapingService::chart_points(self.chart.loaded().map(|chart| chart.data.as_slice()))
    }

    /// Symbols offered in the picker: the most traded ones, with the current
    /// selection always present.
    pub fn symbol_options(&self) -> Vec<String> {
        let current = self.selection.symbol.value();
        let mut options: Vec<String> = Vec::new();
        let traded = self
            .stocks_summary
            .loaded()
            .map(|summary| summary.most_traded_stocks.as_slice())
            .unwrap_or_default();
        for stock in traded {
            let symbol = stock.symbol.trim().to_ascii_uppercase();
            if !symbol.is_empty() && !options.contains(&symbol) {
                options.push(symbol);
            }
        }
        if !options.iter().any(|symbol| symbol == current) {
            options.insert(0, current.to_string());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ApiError;

    fn selection(symbol: &str, period: Period) -> Selection {
        Selection::new(Symbol::new(symbol).unwrap(), period)
    }

    fn statistics(symbol: &str, days: u32) -> StockStatistics {
        serde_json::from_value(serde_json::json!({
            "symbol": symbol,
            "period_days": days,
            "returns_statistics": {"volatility_annualized": 0.2, "sharpe_ratio": 1.0},
            "price_trend": {"first_price": 1, "last_price": 2, "change": 1, "change_percent": 100}
        }))
        .unwrap()
    }

    fn chart(symbol: &str) -> ChartData {
        serde_json::from_value(serde_json::json!({
            "symbol": symbol,
            "data": [{"date": "2024-01-02", "price": 10.0, "volume": 3}]
        }))
        .unwrap()
    }

    #[test]
    fn overview_clears_loading_even_when_a_section_fails() {
        let mut state = AnalyticsState::new(selection("ATW", Period::OneMonth));
        state.begin_overview();
        assert!(state.is_loading());

        state.apply_overview(OverviewBatch {
            stocks_summary: Ok(serde_json::from_str("{}").unwrap()),
            opcvm_summary: Err(ApiError::Http { status: 500, url: "u".into() }),
            market_overview: Err(ApiError::Network("offline".into())),
        });

        assert!(!state.is_loading());
        assert!(state.stocks_summary.loaded().is_some());
        assert_eq!(state.opcvm_summary.failure(), Some("HTTP 500 from u"));
        assert!(state.market_overview.failure().is_some());
        assert!(state.performer_bars().is_empty());
    }

    #[test]
    fn reselecting_the_same_value_is_not_a_change() {
        let mut state = AnalyticsState::new(selection("ATW", Period::OneMonth));
        assert_eq!(state.select_symbol(Symbol::new("atw").unwrap()), None);
        assert_eq!(state.select_period(Period::OneMonth), None);
        assert_eq!(
            state.select_period(Period::OneYear),
            Some(selection("ATW", Period::OneYear))
        );
        assert_eq!(
            state.select_symbol(Symbol::new("IAM").unwrap()),
            Some(selection("IAM", Period::OneYear))
        );
    }

    #[test]
    fn stale_symbol_batch_is_dropped() {
        let mut state = AnalyticsState::new(selection("ATW", Period::OneMonth));
        let stale = state.begin_symbol();
        state.select_symbol(Symbol::new("IAM").unwrap());
        state.begin_symbol();

        let applied = state.apply_symbol(SymbolBatch {
            selection: stale,
            statistics: Ok(statistics("ATW", 30)),
            chart: Ok(chart("ATW")),
        });
        assert!(!applied);
        assert!(state.statistics.is_loading());
        assert!(state.chart.is_loading());

        let applied = state.apply_symbol(SymbolBatch {
            selection: selection("IAM", Period::OneMonth),
            statistics: Ok(statistics("IAM", 30)),
            chart: Ok(chart("IAM")),
        });
        assert!(applied);
        assert_eq!(state.statistics.loaded().map(|s| s.symbol.as_str()), Some("IAM"));
        assert_eq!(state.chart_points().len(), 1);
    }

    #[test]
    fn symbol_failure_keeps_bulk_sections() {
        let mut state = AnalyticsState::new(selection("ATW", Period::OneMonth));
        state.apply_overview(OverviewBatch {
            stocks_summary: Ok(serde_json::from_str(r#"{"sectors": {"Banks": 2}}"#).unwrap()),
            opcvm_summary: Ok(serde_json::from_str("{}").unwrap()),
            market_overview: Err(ApiError::Cancelled),
        });
        let current = state.begin_symbol();
        state.apply_symbol(SymbolBatch {
            selection: current,
            statistics: Err(ApiError::Network("down".into())),
            chart: Err(ApiError::Network("down".into())),
        });

        assert_eq!(state.sector_slices().len(), 1);
        assert!(state.statistics.failure().is_some());
    }

    #[test]
    fn symbol_options_include_current_selection() {
        let mut state = AnalyticsState::new(selection("ATW", Period::OneMonth));
        assert_eq!(state.symbol_options(), vec!["ATW".to_string()]);

        state.apply_overview(OverviewBatch {
            stocks_summary: Ok(serde_json::from_str(
                r#"{"most_traded_stocks": [{"symbol": "iam"}, {"symbol": "BCP"}]}"#,
            )
            .unwrap()),
            opcvm_summary: Err(ApiError::Cancelled),
            market_overview: Err(ApiError::Cancelled),
        });
        assert_eq!(state.symbol_options(), vec!["ATW", "IAM", "BCP"]);
    }
}
