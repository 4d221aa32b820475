use thiserror::Error;

/// Reasons the collections resource could not be turned into markers.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("collections resource unreachable: {0}")]
    Unreachable(String),
    #[error("HTTP error {0}")]
    Http(u16),
    #[error("malformed collections data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("collections data contains no entries")]
    Empty,
}
