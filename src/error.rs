use thiserror::Error;

/// Failure fetching or decoding statistics
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response body: {0}")]
    Decode(#[from] simd_json::Error),

    #[error("invalid api base url: {0}")]
    Url(String),
}
