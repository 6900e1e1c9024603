//! Display helpers for the dashboard cards.

pub fn billions_mad(value: f64) -> String {
    format!("{:.2}B MAD", value / 1_000_000_000.0)
}

pub fn millions(value: f64) -> String {
    format!("{:.1}M", value / 1_000_000.0)
}

pub fn percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Fraction to percent, e.g. annualized volatility `0.2145` -> `21.45%`.
pub fn fraction_as_percent(value: f64) -> String {
    percent(value * 100.0, 2)
}

pub fn signed_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

pub fn ratio(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn price_mad(value: f64) -> String {
    format!("{:.2} MAD", value)
}

pub fn signed_price_mad(value: f64) -> String {
    format!("{:+.2} MAD", value)
}

/// Share counts: millions once they get large, whole units below that.
pub fn volume(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        millions(value)
    } else {
        format!("{:.0}", value)
    }
}
