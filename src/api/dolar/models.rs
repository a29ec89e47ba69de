use thiserror::Error;

/// Failure of a single request against either quote API
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Non-success HTTP status
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}
