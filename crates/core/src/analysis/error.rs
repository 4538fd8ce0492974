use std::fmt;

/// Raised when the provider returned no usable balance-sheet period.
#[derive(Debug, Clone)]
pub struct NoDataError {
    pub detail: String,
}

impl NoDataError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for NoDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

impl std::error::Error for NoDataError {}

/// Raised when the provider could not be reached or answered garbage.
#[derive(Debug, Clone)]
pub struct UpstreamUnavailable {
    pub ticker: String,
    pub detail: String,
}

impl fmt::Display for UpstreamUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "upstream unavailable (ticker={}): {}",
            self.ticker, self.detail
        )
    }
}

impl std::error::Error for UpstreamUnavailable {}
