use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::domain::errors::ValidationError;

/// Ticker shown when nothing else was chosen (Attijariwafa Bank).
pub const DEFAULT_SYMBOL: &str = "ATW";

/// Value Object - ticker symbol, always upper-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: &str) -> Result<Self, ValidationError> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        {
            return Err(ValidationError::InvalidSymbol(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self(DEFAULT_SYMBOL.to_string())
    }
}

/// Trailing window the statistics and chart series are computed over
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr,
    IntoStaticStr, Serialize, Deserialize,
)]
pub enum Period {
    #[default]
    #[strum(serialize = "1M")]
    #[serde(rename = "1M")]
    OneMonth,

    #[strum(serialize = "3M")]
    #[serde(rename = "3M")]
    ThreeMonths,

    #[strum(serialize = "6M")]
    #[serde(rename = "6M")]
    SixMonths,

    #[strum(serialize = "1Y")]
    #[serde(rename = "1Y")]
    OneYear,

    #[strum(serialize = "3Y")]
    #[serde(rename = "3Y")]
    ThreeYears,
}

impl Period {
    pub const fn days(&self) -> u32 {
        match self {
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 365,
            Self::ThreeYears => 1095,
        }
    }

    pub fn from_days(days: u32) -> Result<Self, ValidationError> {
        Self::iter()
            .find(|period| period.days() == days)
            .ok_or(ValidationError::UnsupportedPeriod(days))
    }

    pub fn label(&self) -> &'static str {
        (*self).into()
    }
}

/// Shape of the points requested from the chart-data endpoint
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Candlestick,
    Volume,
}

/// The (symbol, period) pair the per-symbol sections are bound to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub symbol: Symbol,
    pub period: Period,
}

impl Selection {
    pub fn new(symbol: Symbol, period: Period) -> Self {
        Self { symbol, period }
    }

    pub fn with_symbol(&self, symbol: Symbol) -> Self {
        Self::new(symbol, self.period)
    }

    pub fn with_period(&self, period: Period) -> Self {
        Self::new(self.symbol.clone(), period)
    }
}
