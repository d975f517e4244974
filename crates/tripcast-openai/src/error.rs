use serde::Deserialize;
use thiserror::Error;

/// Error envelope returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    error: Option<ApiError>,
}

/// Specific error information from the API
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    r#type: Option<String>,
    code: Option<String>,
}

/// Errors that can occur when making chat completion requests
#[derive(Debug, Error)]
pub enum OpenAiRequestError {
    /// HTTP client errors
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    /// Invalid request errors from the API
    #[error("Invalid request error: {message}")]
    InvalidRequestError {
        code: Option<String>,
        message: String,
        r#type: Option<String>,
    },

    /// Unexpected response from the API
    #[error("Unexpected response from API: {0}")]
    UnexpectedResponse(String),

    /// Missing API key
    #[error("Missing API key")]
    MissingApiKey,
}

/// Parse an error response body into a structured error
pub(crate) fn parse_error_response(
    status: reqwest::StatusCode,
    bytes: bytes::Bytes,
) -> OpenAiRequestError {
    if let Ok(payload) = serde_json::from_slice::<ApiErrorPayload>(&bytes) {
        if let Some(error) = payload.error {
            return OpenAiRequestError::InvalidRequestError {
                code: error.code,
                message: error.message,
                r#type: error.r#type,
            };
        }
    }
    let error_text = String::from_utf8_lossy(&bytes).to_string();
    OpenAiRequestError::UnexpectedResponse(format!(
        "HTTP status {}: {}",
        status.as_u16(),
        error_text
    ))
}
