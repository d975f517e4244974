use serde::Deserialize;
use thiserror::Error;

/// Error envelope returned by the tracking backend
#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    error: Option<String>,
}

/// Errors that can occur when talking to the tracking backend
#[derive(Debug, Error)]
pub enum WandbRequestError {
    /// HTTP client errors
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    /// I/O errors while collecting the code snapshot
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Structured error from the backend
    #[error("Tracking API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Unexpected response from the backend
    #[error("Unexpected response from tracking API: {0}")]
    UnexpectedResponse(String),

    /// Missing API key
    #[error("Missing API key")]
    MissingApiKey,
}

/// Parse an error response body into a structured error
pub(crate) fn parse_error_response(
    status: reqwest::StatusCode,
    bytes: bytes::Bytes,
) -> WandbRequestError {
    if let Ok(payload) = serde_json::from_slice::<ApiErrorPayload>(&bytes) {
        if let Some(message) = payload.error {
            return WandbRequestError::ApiError {
                status: status.as_u16(),
                message,
            };
        }
    }
    let error_text = String::from_utf8_lossy(&bytes).to_string();
    WandbRequestError::UnexpectedResponse(format!(
        "HTTP status {}: {}",
        status.as_u16(),
        error_text
    ))
}
