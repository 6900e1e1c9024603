//! Pure transforms from API responses into chart-ready sequences.
//!
//! Every helper is total: absent or empty input yields an empty sequence.

use serde::Serialize;
use time::Date;
use time::macros::format_description;

use super::entities::{FundPerformance, NamedCounts, RawChartPoint, StockStatistics, StocksSummary};
use super::format::{fraction_as_percent, price_mad, signed_percent, signed_price_mad, volume};

/// Longest fund name shown under a performance bar.
pub const PERFORMER_NAME_LIMIT: usize = 15;

/// Input for one pie slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

/// Input for one performance bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceBar {
    pub name: String,
    pub performance: f64,
}

/// One point of the price line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub display_date: String,
    pub price: f64,
    pub volume: f64,
}

/// One labelled figure in a statistics group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

/// Titled block of detail rows under the headline statistic cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsGroup {
    pub title: &'static str,
    pub rows: Vec<DetailRow>,
}

pub struct ChartShapingService;

impl ChartShapingService {
    /// Sector map -> `[{name, value}]`, in server order.
    pub fn sector_slices(summary: Option<&StocksSummary>) -> Vec<NamedValue> {
        summary
            .map(|summary| Self::named_values(&summary.sectors))
            .unwrap_or_default()
    }

    pub fn named_values(counts: &NamedCounts) -> Vec<NamedValue> {
        counts
            .iter()
            .map(|(name, value)| NamedValue {
                name: name.to_string(),
                value,
            })
            .collect()
    }

    /// Top performers -> `[{name (at most 15 chars), performance}]`.
    pub fn performer_bars(performers: Option<&[FundPerformance]>) -> Vec<PerformanceBar> {
        performers
            .unwrap_or_default()
            .iter()
            .map(|fund| PerformanceBar {
                name: truncate_chars(&fund.name, PERFORMER_NAME_LIMIT),
                performance: fund.performance,
            })
            .collect()
    }

    /// Raw points -> `[{display_date, price, volume}]`.
    ///
    /// Points that carry neither `price` nor `close` are dropped.
    pub fn chart_points(points: Option<&[RawChartPoint]>) -> Vec<ChartPoint> {
        points
            .unwrap_or_default()
            .iter()
            .filter_map(|point| {
                let price = point.price.or(point.close)?;
                Some(ChartPoint {
                    display_date: display_date(&point.date),
                    price,
                    volume: point.volume,
                })
            })
            .collect()
    }
}

/// Statistics payload -> titled groups of formatted rows.
///
/// Optional figures the backend left out are skipped, and a group with no
/// rows left is dropped.
pub fn statistics_groups(stats: &StockStatistics) -> Vec<StatisticsGroup> {
    fn row(label: &'static str, value: String) -> DetailRow {
        DetailRow { label, value }
    }
    fn optional(label: &'static str, value: Option<f64>, format: fn(f64) -> String) -> Option<DetailRow> {
        value.map(|value| row(label, format(value)))
    }

    let trend = &stats.price_trend;
    let returns = &stats.returns_statistics;
    let close = stats.price_statistics.as_ref().map(|prices| &prices.close);

    let mut coverage = vec![
        row("Période:", format!("{} jours", stats.period_days)),
        row("Points de données:", stats.data_points.to_string()),
    ];
    if let Some(range) = &stats.date_range {
        coverage.push(row(
            "Plage de dates:",
            format!("{} → {}", display_date(&range.start), display_date(&range.end)),
        ));
    }

    let groups = [
        StatisticsGroup { title: "Couverture", rows: coverage },
        StatisticsGroup {
            title: "Tendance du prix",
            rows: vec![
                row("Premier prix:", price_mad(trend.first_price)),
                row("Dernier prix:", price_mad(trend.last_price)),
                row("Variation:", signed_price_mad(trend.change)),
            ],
        },
        StatisticsGroup {
            title: "Rendements",
            rows: [
                optional("Rendement moyen journalier:", returns.mean_daily, fraction_as_percent),
                optional("Écart-type journalier:", returns.std_daily, fraction_as_percent),
                optional("Rendement cumulé:", returns.total_return, signed_percent),
            ]
            .into_iter()
            .flatten()
            .collect(),
        },
        StatisticsGroup {
            title: "Prix de clôture",
            rows: [
                optional("Min:", close.and_then(|band| band.min), price_mad),
                optional("Moyenne:", close.and_then(|band| band.mean), price_mad),
                optional("Max:", close.and_then(|band| band.max), price_mad),
            ]
            .into_iter()
            .flatten()
            .collect(),
        },
        StatisticsGroup {
            title: "Volume",
            rows: stats
                .volume_statistics
                .as_ref()
                .map(|volumes| {
                    vec![
                        row("Moyen:", volume(volumes.mean)),
                        row("Min:", volume(volumes.min)),
                        row("Max:", volume(volumes.max)),
                        row("Total:", volume(volumes.total)),
                    ]
                })
                .unwrap_or_default(),
        },
    ];

    groups.into_iter().filter(|group| !group.rows.is_empty()).collect()
}

/// Keep the first `limit` characters (not bytes) of `value`.
pub fn truncate_chars(value: &str, limit: usize) -> String {
    match value.char_indices().nth(limit) {
        Some((byte_idx, _)) => value[..byte_idx].to_string(),
        None => value.to_string(),
    }
}

/// `2024-03-05T00:00:00` -> `05/03/2024`. Unparseable input is returned as-is.
pub fn display_date(iso: &str) -> String {
    let input_format = format_description!("[year]-[month]-[day]");
    let output_format = format_description!("[day]/[month]/[year]");

    iso.get(..10)
        .and_then(|prefix| Date::parse(prefix, input_format).ok())
        .and_then(|date| date.format(output_format).ok())
        .unwrap_or_else(|| iso.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fund(name: &str, performance: f64) -> FundPerformance {
        FundPerformance {
            id: String::new(),
            name: name.to_string(),
            performance,
        }
    }

    #[test]
    fn sector_slices_follow_map_order() {
        let summary: StocksSummary =
            serde_json::from_str(r#"{"sectors": {"Banks": 5, "Energy": 3}}"#).unwrap();
        assert_eq!(
            ChartShapingService::sector_slices(Some(&summary)),
            vec![
                NamedValue { name: "Banks".into(), value: 5.0 },
                NamedValue { name: "Energy".into(), value: 3.0 },
            ]
        );
    }

    #[test]
    fn sector_slices_of_nothing_are_empty() {
        let empty: StocksSummary = serde_json::from_str("{}").unwrap();
        assert!(ChartShapingService::sector_slices(Some(&empty)).is_empty());
        assert!(ChartShapingService::sector_slices(None).is_empty());
    }

    #[test]
    fn long_fund_names_are_cut_to_fifteen_chars() {
        let bars = ChartShapingService::performer_bars(Some(&[fund("Very Long Fund Name Co", 12.3)]));
        assert_eq!(
            bars,
            vec![PerformanceBar { name: "Very Long Fund ".into(), performance: 12.3 }]
        );
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("Épargne Équilibre Sécurité", 9), "Épargne É");
        assert_eq!(truncate_chars("CDG", 15), "CDG");
    }

    #[test]
    fn chart_points_format_dates_and_fall_back_to_close() {
        let points: Vec<RawChartPoint> = serde_json::from_str(
            r#"[
                {"date": "2024-03-05T00:00:00", "price": 410.5, "volume": 1200},
                {"date": "2024-03-06", "close": 412.0, "volume": 900},
                {"date": "garbage", "price": 1.0},
                {"date": "2024-03-07", "volume": 5}
            ]"#,
        )
        .unwrap();

        let shaped = ChartShapingService::chart_points(Some(&points));
        assert_eq!(shaped.len(), 3);
        assert_eq!(shaped[0].display_date, "05/03/2024");
        assert_eq!(shaped[1].price, 412.0);
        assert_eq!(shaped[2].display_date, "garbage");
        assert!(ChartShapingService::chart_points(None).is_empty());
    }

    #[test]
    fn statistics_groups_skip_missing_figures() {
        let stats: StockStatistics = serde_json::from_str(
            r#"{
                "symbol": "ATW",
                "period_days": 7,
                "data_points": 5,
                "returns_statistics": {"volatility_annualized": 0.2, "total_return": -1.5, "sharpe_ratio": 0.4},
                "price_trend": {"first_price": 100, "last_price": 98.5, "change": -1.5, "change_percent": -1.5}
            }"#,
        )
        .unwrap();

        let groups = statistics_groups(&stats);
        let titles: Vec<&str> = groups.iter().map(|group| group.title).collect();
        assert_eq!(titles, vec!["Couverture", "Tendance du prix", "Rendements"]);
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(
            groups[2].rows,
            vec![DetailRow { label: "Rendement cumulé:", value: "-1.50%".into() }]
        );
        assert_eq!(groups[1].rows[2].value, "-1.50 MAD");
    }

    #[test]
    fn statistics_groups_read_partial_price_bands() {
        let stats: StockStatistics = serde_json::from_str(
            r#"{
                "symbol": "IAM",
                "period_days": 30,
                "price_statistics": {"open": {}, "close": {"max": 120}, "high": {}, "low": {}},
                "returns_statistics": {"volatility_annualized": 0.2, "sharpe_ratio": 0.4},
                "price_trend": {"first_price": 100, "last_price": 110, "change": 10, "change_percent": 10}
            }"#,
        )
        .unwrap();

        let groups = statistics_groups(&stats);
        let close = groups
            .iter()
            .find(|group| group.title == "Prix de clôture")
            .unwrap();
        assert_eq!(close.rows, vec![DetailRow { label: "Max:", value: "120.00 MAD".into() }]);
        assert!(groups.iter().all(|group| group.title != "Volume"));
    }
}
