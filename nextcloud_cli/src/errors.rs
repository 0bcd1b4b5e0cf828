use std::fmt;

use console::style;
use nextcloud_core::ConnectionError;
use nextcloud_dav::ClientError;
use nextcloud_mcp::ServerError;

use crate::config::SETUP_GUIDANCE;

/// Errors that end the process with a non-zero status.
#[derive(Debug)]
pub enum CliError {
    /// One or more of the named environment variables is unset or empty.
    MissingConfiguration(Vec<&'static str>),
    InvalidConfiguration(ConnectionError),
    Client(ClientError),
    Server(ServerError),
}

impl CliError {
    /// The text printed to stderr before exiting. Missing settings are
    /// followed by the setup guidance.
    pub fn report(&self) -> String {
        let headline = format!("{} {}", style("Error:").red().bold(), self);
        match self {
            CliError::MissingConfiguration(_) => format!("{}\n\n{}", headline, SETUP_GUIDANCE),
            _ => headline,
        }
    }
}

impl From<ConnectionError> for CliError {
    fn from(err: ConnectionError) -> Self {
        CliError::InvalidConfiguration(err)
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        CliError::Client(err)
    }
}

impl From<ServerError> for CliError {
    fn from(err: ServerError) -> Self {
        CliError::Server(err)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingConfiguration(names) => write!(
                f,
                "Missing required environment variables: {}",
                names.join(", ")
            ),
            CliError::InvalidConfiguration(err) => write!(f, "Invalid configuration: {}", err),
            CliError::Client(err) => write!(f, "Failed to create Nextcloud client: {}", err),
            CliError::Server(err) => write!(f, "Failed to start Nextcloud MCP server: {}", err),
        }
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_states_error_once() {
        let err = CliError::Server(ServerError::Mcp("connection closed".to_string()));

        let report = err.report();

        assert_eq!(report.matches("connection closed").count(), 1);
        assert_eq!(report.lines().count(), 1);
        assert!(!report.contains(SETUP_GUIDANCE));
    }

    #[test]
    fn test_report_adds_guidance_for_missing_settings() {
        let err = CliError::MissingConfiguration(vec!["NEXTCLOUD_URL", "NEXTCLOUD_PASSWORD"]);

        let report = err.report();

        assert!(report.contains("Missing required environment variables: NEXTCLOUD_URL, NEXTCLOUD_PASSWORD"));
        assert!(report.ends_with(SETUP_GUIDANCE));
    }
}
