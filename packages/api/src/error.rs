use thiserror::Error;

/// Failure talking to the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("unexpected response from backend: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend is not configured: {0}")]
    Config(String),

    #[error("oauth sign-in failed: {0}")]
    OAuth(String),

    #[error("no signed-in session")]
    NotSignedIn,
}

impl BackendError {
    /// The message a user would see for this error.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<url::ParseError> for BackendError {
    fn from(e: url::ParseError) -> Self {
        BackendError::Config(e.to_string())
    }
}
