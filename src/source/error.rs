use reqwest::StatusCode;

/// Failures at the data-source boundary.
///
/// Everything past this boundary (filtering, aggregation) is infallible.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{detail}")]
    Status { status: StatusCode, detail: String },

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to read roster file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid roster file {path}: {reason}")]
    InvalidRoster { path: String, reason: String },

    #[error("invalid base URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Human-readable description surfaced to consumers as the store error
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// True for a non-success response with the given status
    pub fn is_status(&self, status: StatusCode) -> bool {
        matches!(self, FetchError::Status { status: s, .. } if *s == status)
    }
}
