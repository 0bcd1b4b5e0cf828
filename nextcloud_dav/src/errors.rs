use std::fmt;

use reqwest::StatusCode;

/// Errors returned by [`crate::NextcloudClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The addressed remote resource does not exist.
    NotFound(String),
    /// Non-success status or network failure. `reason` is the status text
    /// or the transport's error message.
    Transport { action: &'static str, reason: String },
    /// The server answered but the body could not be read.
    InvalidResponse { action: &'static str, reason: String },
}

impl ClientError {
    pub(crate) fn transport(action: &'static str, reason: impl ToString) -> Self {
        ClientError::Transport {
            action,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_response(action: &'static str, reason: impl ToString) -> Self {
        ClientError::InvalidResponse {
            action,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn from_status(action: &'static str, status: StatusCode) -> Self {
        let reason = status
            .canonical_reason()
            .map(String::from)
            .unwrap_or_else(|| status.as_str().to_string());
        ClientError::Transport { action, reason }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::NotFound(resource) => write!(f, "Not found: {}", resource),
            ClientError::Transport { action, reason } => {
                write!(f, "Failed to {}: {}", action, reason)
            }
            ClientError::InvalidResponse { action, reason } => {
                write!(f, "Failed to {}: unexpected response ({})", action, reason)
            }
        }
    }
}

impl std::error::Error for ClientError {}
