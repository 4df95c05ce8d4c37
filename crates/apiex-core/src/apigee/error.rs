use thiserror::Error;

/// Errors that can occur talking to the Apigee management API.
#[derive(Debug, Error)]
pub enum ApigeeError {
    #[error("Missing API token. Set the APIGEE_TOKEN environment variable.")]
    MissingToken,

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ApigeeError {
    fn from(err: reqwest::Error) -> Self {
        ApigeeError::Network(err.to_string())
    }
}
