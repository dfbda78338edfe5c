//! Typed fetch failures.
//!
//! Every upstream problem keeps its distinguishable cause so the UI layer
//! can render an accurate diagnostic instead of a generic warning, and so
//! "zero events occurred" never looks like "fetch failed".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("upstream returned an empty dataset")]
    EmptyDataset,

    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

impl FetchError {
    /// Stable machine-readable cause tag for API diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout => "timeout",
            FetchError::UpstreamStatus(_) => "upstream_status",
            FetchError::Network(_) => "network",
            FetchError::Malformed(_) => "malformed",
            FetchError::EmptyDataset => "empty_dataset",
            FetchError::MissingColumn(_) => "missing_column",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::UpstreamStatus(status.as_u16())
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
