use thiserror::Error;

/// A failed metrics-backend call. Callers downgrade this to "no rows".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("prometheus error ({error_type}): {message}")]
    Api { error_type: String, message: String },
}
