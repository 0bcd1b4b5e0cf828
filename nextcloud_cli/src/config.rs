//! Connection settings read from the command line and environment.

use nextcloud_core::ConnectionContext;

use crate::errors::CliError;

pub const ENV_URL: &str = "NEXTCLOUD_URL";
pub const ENV_USERNAME: &str = "NEXTCLOUD_USERNAME";
pub const ENV_PASSWORD: &str = "NEXTCLOUD_PASSWORD";

/// Printed when connection settings are missing.
pub const SETUP_GUIDANCE: &str = "\
Required environment variables:
  NEXTCLOUD_URL - Base URL of your Nextcloud instance (e.g., https://cloud.example.com)
  NEXTCLOUD_USERNAME - Your Nextcloud username
  NEXTCLOUD_PASSWORD - Your Nextcloud app password

To create an app password:
  1. Go to your Nextcloud Settings
  2. Navigate to Security
  3. Create a new app password";

/// Builds the connection context, reporting every missing setting at once.
pub fn connection_context(
    url: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<ConnectionContext, CliError> {
    fn present(value: Option<&str>) -> Option<&str> {
        value.filter(|v| !v.trim().is_empty())
    }
    let (url, username, password) = (present(url), present(username), present(password));

    let missing: Vec<&'static str> = [
        (ENV_URL, url.is_none()),
        (ENV_USERNAME, username.is_none()),
        (ENV_PASSWORD, password.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, is_missing)| is_missing.then_some(name))
    .collect();

    match (url, username, password) {
        (Some(url), Some(username), Some(password)) => {
            Ok(ConnectionContext::new(url, username, password)?)
        }
        _ => Err(CliError::MissingConfiguration(missing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_complete_configuration() {
        let context =
            connection_context(Some("https://cloud.example.com"), Some("alice"), Some("pw"))
                .unwrap();
        assert_eq!(context.username(), "alice");
    }

    #[test]
    fn test_reports_all_missing_values() {
        let result = connection_context(None, Some(""), Some("pw"));
        assert_matches!(
            result,
            Err(CliError::MissingConfiguration(names)) if names == vec![ENV_URL, ENV_USERNAME]
        );
    }

    #[test]
    fn test_invalid_url() {
        let result = connection_context(Some("not a url"), Some("alice"), Some("pw"));
        assert_matches!(result, Err(CliError::InvalidConfiguration(_)));
    }
}
