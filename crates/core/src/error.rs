use chrono::NaiveDate;
use std::fmt;

/// Validation failures raised by the scoring stages. All of these are
/// detected before any computation runs; none are retryable.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// End of the forecast range precedes its start.
    InvalidRange { start: NaiveDate, end: NaiveDate },
    /// No cost points to evaluate.
    EmptySeries,
    /// Local market price is zero or negative; margins are undefined.
    InvalidPrice { local_market_price: f64 },
    /// Required historical data is absent or unusable.
    MissingBaseline { detail: &'static str },
}

impl PipelineError {
    /// Stable machine-readable code for the serving layer's
    /// error-to-status mapping.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::InvalidRange { .. } => "INVALID_RANGE",
            PipelineError::EmptySeries => "EMPTY_SERIES",
            PipelineError::InvalidPrice { .. } => "INVALID_PRICE",
            PipelineError::MissingBaseline { .. } => "MISSING_BASELINE",
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::InvalidRange { start, end } => {
                write!(f, "invalid date range: end {end} precedes start {start}")
            }
            PipelineError::EmptySeries => write!(f, "cost series is empty"),
            PipelineError::InvalidPrice { local_market_price } => {
                write!(
                    f,
                    "local market price must be positive (got {local_market_price})"
                )
            }
            PipelineError::MissingBaseline { detail } => {
                write!(f, "historical baseline unavailable: {detail}")
            }
        }
    }
}

impl std::error::Error for PipelineError {}
