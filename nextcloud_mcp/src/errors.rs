use std::fmt;

use nextcloud_dav::ClientError;

use crate::pipeline::ValidationError;

/// Failure of a single tool invocation.
#[derive(Debug)]
pub enum ToolError {
    /// Arguments did not match the declared input shape.
    Validation(ValidationError),
    /// The remote call failed.
    Client(ClientError),
    /// The handler's result could not be turned into JSON.
    Serialize(String),
}

impl ToolError {
    /// Machine readable code carried in the failure envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::Validation(_) => "validation_error",
            ToolError::Client(ClientError::NotFound(_)) => "not_found",
            ToolError::Client(_) | ToolError::Serialize(_) => "transport_error",
        }
    }
}

impl From<ValidationError> for ToolError {
    fn from(err: ValidationError) -> Self {
        ToolError::Validation(err)
    }
}

impl From<ClientError> for ToolError {
    fn from(err: ClientError) -> Self {
        ToolError::Client(err)
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Serialize(err.to_string())
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Validation(err) => write!(f, "Invalid arguments: {}", err),
            ToolError::Client(err) => write!(f, "{}", err),
            ToolError::Serialize(msg) => write!(f, "Failed to serialize result: {}", msg),
        }
    }
}

impl std::error::Error for ToolError {}
