//! Shared fixtures for client tests against a mock Nextcloud server.

use nextcloud_core::ConnectionContext;
use nextcloud_dav::NextcloudClient;

/// `Authorization` header value for `alice:secret`.
pub const BASIC_AUTH: &str = "Basic YWxpY2U6c2VjcmV0";

/// Creates a client pointing at a mockito server.
pub fn client_for(server: &mockito::Server) -> NextcloudClient {
    let context = ConnectionContext::new(&server.url(), "alice", "secret").unwrap();
    NextcloudClient::new(context).unwrap()
}

/// Wraps response elements into a multistatus document.
pub fn multistatus(responses: &str) -> String {
    format!(
        r#"<?xml version="1.0"?><d:multistatus xmlns:d="DAV:" xmlns:cal="urn:ietf:params:xml:ns:caldav" xmlns:card="urn:ietf:params:xml:ns:carddav">{}</d:multistatus>"#,
        responses
    )
}
