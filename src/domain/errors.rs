use thiserror::Error;

/// Failures surfaced by the analytics API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or never completed (offline, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// The body did not match the expected schema.
    #[error("unexpected response shape: {0}")]
    Decode(String),

    /// A newer request superseded this one.
    #[error("request superseded")]
    Cancelled,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Input rejected before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("symbol '{0}' contains unsupported characters")]
    InvalidSymbol(String),

    #[error("{0} is not a supported period")]
    UnsupportedPeriod(u32),

    #[error("select at least one symbol")]
    NoSymbols,

    #[error("at most {max} symbols can be optimized at once (got {got})")]
    TooManySymbols { max: usize, got: usize },

    #[error("weights must satisfy 0 <= min ({min}) <= max ({max}) <= 1")]
    WeightBounds { min: String, max: String },

    #[error("lookback period must be positive")]
    LookbackPeriod,

    #[error("'{value}' is not a valid number for {field}")]
    InvalidNumber { field: &'static str, value: String },
}

pub type ApiResult<T> = Result<T, ApiError>;
