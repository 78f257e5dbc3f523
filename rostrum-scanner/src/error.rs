use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("Other error: {0}")]
    Other(String),
}

impl ScanError {
    /// True for errors produced by a single page fetch, which the crawler and
    /// downloader recover from instead of propagating.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, ScanError::HttpError(_) | ScanError::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
