//! Portfolio optimization request/response contract.
//!
//! The optimizer itself runs on the backend. This module only builds and
//! validates requests and reads the results back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use super::analytics::Symbol;
use super::errors::ValidationError;

/// Largest universe the backend accepts in one request.
pub const MAX_SYMBOLS: usize = 100;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMethod {
    #[default]
    MeanVariance,
    Cvar,
    Robust,
}

impl OptimizationMethod {
    /// Route segment under `/optimize/`.
    pub const fn path_segment(&self) -> &'static str {
        match self {
            Self::MeanVariance => "mean-variance",
            Self::Cvar => "cvar",
            Self::Robust => "robust",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::MeanVariance => "Mean-Variance (Markowitz)",
            Self::Cvar => "CVaR",
            Self::Robust => "Robust",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    pub symbols: Vec<Symbol>,
    /// `None` maximizes the Sharpe ratio.
    pub target_return: Option<f64>,
    pub method: OptimizationMethod,
    /// CVaR confidence tail, e.g. 0.05 for 95%.
    pub alpha: f64,
    pub cvar_max: Option<f64>,
    pub volatility_max: Option<f64>,
    pub max_weight: f64,
    pub min_weight: f64,
    /// Sector name -> maximum total weight.
    pub sector_constraints: Option<BTreeMap<String, f64>>,
    pub hhi_max: Option<f64>,
    pub uncertainty_radius: Option<f64>,
    pub lookback_period: u32,
    pub use_ledoit_wolf: bool,
}

impl Default for OptimizationRequest {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            target_return: None,
            method: OptimizationMethod::default(),
            alpha: 0.05,
            cvar_max: None,
            volatility_max: None,
            max_weight: 0.1,
            min_weight: 0.0,
            sector_constraints: None,
            hhi_max: None,
            uncertainty_radius: None,
            lookback_period: 252,
            use_ledoit_wolf: true,
        }
    }
}

impl OptimizationRequest {
    pub fn new(symbols: Vec<Symbol>, method: OptimizationMethod) -> Self {
        Self {
            symbols,
            method,
            ..Self::default()
        }
    }

    pub fn with_weight_bounds(mut self, min_weight: f64, max_weight: f64) -> Self {
        self.min_weight = min_weight;
        self.max_weight = max_weight;
        self
    }

    pub fn with_target_return(mut self, target_return: Option<f64>) -> Self {
        self.target_return = target_return;
        self
    }

    pub fn with_lookback_period(mut self, lookback_period: u32) -> Self {
        self.lookback_period = lookback_period;
        self
    }

    /// Checks everything the backend would otherwise reject after a round trip.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symbols.is_empty() {
            return Err(ValidationError::NoSymbols);
        }
        if self.symbols.len() > MAX_SYMBOLS {
            return Err(ValidationError::TooManySymbols {
                max: MAX_SYMBOLS,
                got: self.symbols.len(),
            });
        }
        let bounds_ok = self.min_weight.is_finite()
            && self.max_weight.is_finite()
            && 0.0 <= self.min_weight
            && self.min_weight <= self.max_weight
            && self.max_weight <= 1.0;
        if !bounds_ok {
            return Err(ValidationError::WeightBounds {
                min: self.min_weight.to_string(),
                max: self.max_weight.to_string(),
            });
        }
        if self.lookback_period == 0 {
            return Err(ValidationError::LookbackPeriod);
        }
        Ok(())
    }
}

/// Split free-form input on commas and whitespace into distinct symbols,
/// keeping first-seen order.
pub fn parse_symbols(input: &str) -> Result<Vec<Symbol>, ValidationError> {
    let mut symbols: Vec<Symbol> = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        let symbol = Symbol::new(token)?;
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    Ok(symbols)
}

/// Raw text of the optimize form, as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeForm {
    pub symbols: String,
    pub method: OptimizationMethod,
    pub min_weight: String,
    pub max_weight: String,
    /// Blank means maximize Sharpe.
    pub target_return: String,
    pub lookback_period: String,
}

impl Default for OptimizeForm {
    fn default() -> Self {
        let defaults = OptimizationRequest::default();
        Self {
            symbols: String::new(),
            method: defaults.method,
            min_weight: defaults.min_weight.to_string(),
            max_weight: defaults.max_weight.to_string(),
            target_return: String::new(),
            lookback_period: defaults.lookback_period.to_string(),
        }
    }
}

fn parse_number<N: std::str::FromStr>(field: &'static str, raw: &str) -> Result<N, ValidationError> {
    raw.trim().replace(',', ".").parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.trim().to_string(),
    })
}

impl OptimizeForm {
    /// Parse and validate into a request ready to send.
    pub fn to_request(&self) -> Result<OptimizationRequest, ValidationError> {
        let symbols = parse_symbols(&self.symbols)?;
        let min_weight: f64 = parse_number("min weight", &self.min_weight)?;
        let max_weight: f64 = parse_number("max weight", &self.max_weight)?;
        let target_return = match self.target_return.trim() {
            "" => None,
            raw => Some(parse_number::<f64>("target return", raw)?),
        };
        let lookback_period: u32 = parse_number("lookback period", &self.lookback_period)?;

        let request = OptimizationRequest::new(symbols, self.method)
            .with_weight_bounds(min_weight, max_weight)
            .with_target_return(target_return)
            .with_lookback_period(lookback_period);
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResponse {
    /// One weight per requested symbol, in request order.
    pub weights: Vec<f64>,
    pub expected_return: f64,
    pub volatility: f64,
    #[serde(default)]
    pub sharpe_ratio: Option<f64>,
    #[serde(default)]
    pub cvar: Option<f64>,
    #[serde(default)]
    pub var: Option<f64>,
    #[serde(default)]
    pub diversification_ratio: Option<f64>,
    pub method_used: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub symbol: String,
    pub weight: f64,
}

/// A response paired with the symbols it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    pub symbols: Vec<Symbol>,
    pub response: OptimizationResponse,
}

impl OptimizationOutcome {
    /// Weights zipped with their symbols, largest first.
    pub fn allocations(&self) -> Vec<Allocation> {
        let mut allocations: Vec<Allocation> = self
            .symbols
            .iter()
            .zip(&self.response.weights)
            .map(|(symbol, weight)| Allocation {
                symbol: symbol.value().to_string(),
                weight: *weight,
            })
            .collect();
        allocations.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        allocations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn symbols(input: &str) -> Vec<Symbol> {
        parse_symbols(input).unwrap()
    }

    #[test]
    fn method_wire_names() {
        assert_eq!(OptimizationMethod::Cvar.path_segment(), "cvar");
        assert_eq!(OptimizationMethod::MeanVariance.path_segment(), "mean-variance");
        assert_eq!(OptimizationMethod::MeanVariance.as_ref(), "mean_variance");
        assert_eq!(OptimizationMethod::from_str("robust").unwrap(), OptimizationMethod::Robust);
        assert_eq!(
            serde_json::to_string(&OptimizationMethod::MeanVariance).unwrap(),
            "\"mean_variance\""
        );
    }

    #[test]
    fn parse_symbols_splits_and_dedups() {
        let parsed: Vec<String> = symbols(" atw, IAM  bcp,atw ;")
            .into_iter()
            .map(|s| s.value().to_string())
            .collect();
        assert_eq!(parsed, vec!["ATW", "IAM", "BCP"]);
        assert!(parse_symbols("   ").unwrap().is_empty());
        assert!(matches!(parse_symbols("ATW, A/B"), Err(ValidationError::InvalidSymbol(_))));
    }

    #[test]
    fn request_defaults_follow_backend() {
        let request = OptimizationRequest::new(symbols("ATW"), OptimizationMethod::Cvar);
        assert_eq!(request.max_weight, 0.1);
        assert_eq!(request.lookback_period, 252);
        assert_eq!(request.alpha, 0.05);
        assert!(request.use_ledoit_wolf);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["symbols"], serde_json::json!(["ATW"]));
        assert_eq!(body["method"], "cvar");
        assert!(body["target_return"].is_null());
    }

    #[test]
    fn validation_rules() {
        let base = OptimizationRequest::new(symbols("ATW IAM"), OptimizationMethod::MeanVariance);
        assert_eq!(base.validate(), Ok(()));

        let empty = OptimizationRequest::new(Vec::new(), OptimizationMethod::MeanVariance);
        assert_eq!(empty.validate(), Err(ValidationError::NoSymbols));

        let many: Vec<Symbol> = (0..101).map(|i| Symbol::new(&format!("S{i}")).unwrap()).collect();
        let too_many = OptimizationRequest::new(many, OptimizationMethod::Robust);
        assert_eq!(
            too_many.validate(),
            Err(ValidationError::TooManySymbols { max: 100, got: 101 })
        );

        let inverted = base.clone().with_weight_bounds(0.5, 0.2);
        assert!(matches!(inverted.validate(), Err(ValidationError::WeightBounds { .. })));
        let above_one = base.clone().with_weight_bounds(0.0, 1.5);
        assert!(above_one.validate().is_err());
        let nan = base.clone().with_weight_bounds(f64::NAN, 0.5);
        assert!(nan.validate().is_err());

        assert_eq!(
            base.with_lookback_period(0).validate(),
            Err(ValidationError::LookbackPeriod)
        );
    }

    #[test]
    fn form_parses_into_validated_request() {
        let form = OptimizeForm {
            symbols: "atw, iam".into(),
            method: OptimizationMethod::Robust,
            min_weight: "0,05".into(),
            max_weight: " 0.6 ".into(),
            target_return: "".into(),
            lookback_period: "126".into(),
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.symbols.len(), 2);
        assert_eq!(request.min_weight, 0.05);
        assert_eq!(request.max_weight, 0.6);
        assert_eq!(request.target_return, None);
        assert_eq!(request.lookback_period, 126);
        assert_eq!(request.method, OptimizationMethod::Robust);
    }

    #[test]
    fn form_reports_bad_numbers_and_rules() {
        let form = OptimizeForm {
            symbols: "ATW".into(),
            max_weight: "lots".into(),
            ..OptimizeForm::default()
        };
        assert_eq!(
            form.to_request(),
            Err(ValidationError::InvalidNumber { field: "max weight", value: "lots".into() })
        );

        let empty = OptimizeForm::default();
        assert_eq!(empty.to_request(), Err(ValidationError::NoSymbols));

        let negative_lookback = OptimizeForm {
            symbols: "ATW".into(),
            lookback_period: "-3".into(),
            ..OptimizeForm::default()
        };
        assert!(matches!(
            negative_lookback.to_request(),
            Err(ValidationError::InvalidNumber { field: "lookback period", .. })
        ));
    }

    #[test]
    fn allocations_pair_weights_with_symbols() {
        let response: OptimizationResponse = serde_json::from_str(
            r#"{"weights": [0.25, 0.75], "expected_return": 0.1, "volatility": 0.2, "method_used": "mean_variance"}"#,
        )
        .unwrap();
        let outcome = OptimizationOutcome { symbols: symbols("ATW,IAM"), response };
        assert_eq!(
            outcome.allocations(),
            vec![
                Allocation { symbol: "IAM".into(), weight: 0.75 },
                Allocation { symbol: "ATW".into(), weight: 0.25 },
            ]
        );
    }
}
