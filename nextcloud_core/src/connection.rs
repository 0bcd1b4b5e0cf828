//! Connection details for one Nextcloud account.

use std::fmt;

use secrecy::{ExposeSecret, Secret};
use url::Url;

/// Base address, principal and credential used for every remote call.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ConnectionContext {
    base_url: Url,
    username: String,
    password: Secret<String>,
}

/// Errors raised while building a connection context.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionError {
    InvalidUrl(String, String),
    UnsupportedScheme(String),
    MissingUsername,
    MissingPassword,
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidUrl(url, error) => {
                write!(f, "Invalid Nextcloud URL '{}': {}", url, error)
            }
            ConnectionError::UnsupportedScheme(scheme) => write!(
                f,
                "Unsupported URL scheme '{}', expected http or https",
                scheme
            ),
            ConnectionError::MissingUsername => write!(f, "Username must not be empty"),
            ConnectionError::MissingPassword => write!(f, "Password must not be empty"),
        }
    }
}

impl std::error::Error for ConnectionError {}

impl ConnectionContext {
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConnectionError> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| ConnectionError::InvalidUrl(base_url.to_string(), e.to_string()))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConnectionError::UnsupportedScheme(
                parsed.scheme().to_string(),
            ));
        }

        let username = username.into();
        if username.trim().is_empty() {
            return Err(ConnectionError::MissingUsername);
        }

        let password = password.into();
        if password.is_empty() {
            return Err(ConnectionError::MissingPassword);
        }

        Ok(Self {
            base_url: parsed,
            username,
            password: Secret::new(password),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// Builds an absolute URL below the base address.
    ///
    /// Each segment is percent-encoded on its own, so a segment may contain
    /// spaces or `#` but never introduces extra path levels. Empty segments
    /// are skipped; `trailing_slash` marks collection URLs.
    pub fn endpoint<'a, I>(&self, segments: I, trailing_slash: bool) -> Url
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments.into_iter().filter(|s| !s.is_empty()));
            if trailing_slash {
                path.push("");
            }
        }
        url
    }
}
