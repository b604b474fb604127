//! User-facing wording for remote failures.
//!
//! The backend only gives us a message string, so failures are bucketed by
//! case-insensitive substring.

use api::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Permission,
    InvalidFileType,
    Generic,
}

pub fn classify(message: &str) -> ErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("network request failed") || lower.contains("fetch") {
        ErrorKind::Network
    } else if lower.contains("policy") {
        ErrorKind::Permission
    } else if lower.contains("mime type") {
        ErrorKind::InvalidFileType
    } else {
        ErrorKind::Generic
    }
}

/// Transport failures are network errors whatever their text says.
pub fn classify_backend(error: &BackendError) -> ErrorKind {
    match error {
        BackendError::Network(_) => ErrorKind::Network,
        other => classify(&other.user_message()),
    }
}

/// Title and body of an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAlert {
    pub title: String,
    pub body: String,
}

impl UserAlert {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Alert for a failed action, with the generic fallback when the remote
    /// gave no message.
    pub fn failure(title: &str, message: &str) -> Self {
        if message.trim().is_empty() {
            Self::new(title, "An unexpected error occurred.")
        } else {
            Self::new(title, message)
        }
    }
}

/// Alert for a failed upload of the given kind.
pub fn user_alert(kind: ErrorKind, message: &str) -> UserAlert {
    let body = match kind {
        ErrorKind::Network => format!(
            "Network error during upload: {message}. Please check your connection and backend URL/keys."
        ),
        ErrorKind::Permission => {
            format!("Permission denied: {message}. Check storage policies (RLS).")
        }
        ErrorKind::InvalidFileType => {
            format!("Invalid file type: {message}. Please select a valid PDF.")
        }
        ErrorKind::Generic if message.trim().is_empty() => {
            "An unexpected error occurred during upload.".to_string()
        }
        ErrorKind::Generic => message.to_string(),
    };
    UserAlert::new("Upload Failed", body)
}
