//! Typed response schemas for the analytics endpoints.
//!
//! Fields the dashboard renders are required, so a response that drifts away
//! from the expected shape fails to decode instead of rendering half a card.
//! Everything else is defaulted.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::value_objects::ChartType;

/// Name -> count mapping that keeps the server's key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedCounts(Vec<(String, f64)>);

impl NamedCounts {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for NamedCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NamedCountsVisitor;

        impl<'de> Visitor<'de> for NamedCountsVisitor {
            type Value = NamedCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of names to numeric counts")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<Option<String>, Option<f64>>()? {
                    // The backend groups by a nullable column; unnamed buckets are skipped.
                    if let (Some(name), Some(value)) = (name, value) {
                        entries.push((name, value));
                    }
                }
                Ok(NamedCounts(entries))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(NamedCounts::default())
            }
        }

        deserializer.deserialize_any(NamedCountsVisitor)
    }
}

impl Serialize for NamedCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// /analytics/market/overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub market_statistics: MarketStatistics,
    pub trading_activity: TradingActivity,
    #[serde(default)]
    pub sector_distribution: NamedCounts,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStatistics {
    pub total_listed_stocks: u64,
    #[serde(default)]
    pub stocks_with_price_data: u64,
    pub coverage_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingActivity {
    pub last_30_days_volume: f64,
    #[serde(default)]
    pub average_daily_volume: f64,
}

// ---------------------------------------------------------------------------
// /analytics/stocks/summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StocksSummary {
    #[serde(default)]
    pub total_stocks: u64,
    #[serde(default)]
    pub sectors: NamedCounts,
    #[serde(default)]
    pub market_cap_statistics: Option<MarketCapStatistics>,
    #[serde(default)]
    pub most_traded_stocks: Vec<TradedStock>,
    #[serde(default)]
    pub stocks: Vec<StockListing>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCapStatistics {
    #[serde(default)]
    pub total: u64,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradedStock {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockListing {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

// ---------------------------------------------------------------------------
// /analytics/opcvm/summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpcvmSummary {
    #[serde(default)]
    pub total_opcvm: u64,
    #[serde(default)]
    pub categories: NamedCounts,
    #[serde(default)]
    pub performance_statistics: Option<PerformanceStatistics>,
    #[serde(default)]
    pub best_performers_1y: Vec<FundPerformance>,
    #[serde(default)]
    pub worst_performers_1y: Vec<FundPerformance>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStatistics {
    #[serde(rename = "1y")]
    pub one_year: PerformanceWindow,
    #[serde(rename = "3y", default)]
    pub three_year: Option<PerformanceWindow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceWindow {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundPerformance {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    pub name: String,
    pub performance: f64,
}

/// Fund ids come back as strings or integers depending on the scraper.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => id,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

// ---------------------------------------------------------------------------
// /analytics/stocks/{symbol}/statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockStatistics {
    pub symbol: String,
    pub period_days: u32,
    #[serde(default)]
    pub data_points: u64,
    #[serde(default)]
    pub price_statistics: Option<PriceStatistics>,
    #[serde(default)]
    pub volume_statistics: Option<VolumeStatistics>,
    pub returns_statistics: ReturnsStatistics,
    pub price_trend: PriceTrend,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub open: PriceBand,
    pub close: PriceBand,
    pub high: PriceBand,
    pub low: PriceBand,
}

/// Summary of one price column. Not every column reports every moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub std: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeStatistics {
    pub mean: f64,
    #[serde(default)]
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsStatistics {
    #[serde(default)]
    pub mean_daily: Option<f64>,
    #[serde(default)]
    pub std_daily: Option<f64>,
    /// Annualized standard deviation of daily returns, as a fraction.
    pub volatility_annualized: f64,
    /// Percent.
    #[serde(default)]
    pub total_return: Option<f64>,
    pub sharpe_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTrend {
    pub first_price: f64,
    pub last_price: f64,
    pub change: f64,
    /// Percent.
    pub change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

// ---------------------------------------------------------------------------
// /analytics/stocks/{symbol}/chart-data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub symbol: String,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub data_points: u64,
    pub data: Vec<RawChartPoint>,
}

/// One point as sent by the server. Line points carry `price`, candlestick
/// points carry OHLC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChartPoint {
    pub date: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_counts_keep_server_order() {
        let summary: StocksSummary = serde_json::from_str(
            r#"{"sectors": {"Telecom": 1, "Banks": 5, "Energy": 3, "null": null}}"#,
        )
        .unwrap();
        let names: Vec<&str> = summary.sectors.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Telecom", "Banks", "Energy"]);
    }

    #[test]
    fn null_sectors_decode_as_empty() {
        let summary: StocksSummary = serde_json::from_str(r#"{"sectors": null}"#).unwrap();
        assert!(summary.sectors.is_empty());
    }

    #[test]
    fn market_overview_requires_statistics_block() {
        let missing = serde_json::from_str::<MarketOverview>(
            r#"{"trading_activity": {"last_30_days_volume": 10}}"#,
        );
        assert!(missing.is_err());
    }

    #[test]
    fn fund_ids_accept_numbers() {
        let fund: FundPerformance =
            serde_json::from_str(r#"{"id": 42, "name": "CDG Actions", "performance": 7.5}"#).unwrap();
        assert_eq!(fund.id, "42");
    }

    #[test]
    fn statistics_tolerate_missing_optional_moments() {
        let stats: StockStatistics = serde_json::from_str(
            r#"{
                "symbol": "ATW",
                "period_days": 30,
                "returns_statistics": {"volatility_annualized": 0.21, "sharpe_ratio": 1.4},
                "price_trend": {"first_price": 400, "last_price": 420, "change": 20, "change_percent": 5}
            }"#,
        )
        .unwrap();
        assert_eq!(stats.returns_statistics.std_daily, None);
        assert!(stats.price_statistics.is_none());
    }
}
