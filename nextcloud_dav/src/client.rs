//! Authenticated operations against one Nextcloud account.

use std::sync::Arc;

use chrono::Utc;
use log::debug;
use nextcloud_core::records::{
    decode_contact_or, decode_contacts, decode_events, encode_contact, encode_event,
};
use nextcloud_core::uid::{generate_event_uid, generate_uid};
use nextcloud_core::{
    ConnectionContext, ContactRecord, EventRecord, FileEntry, NewContact, NewEvent, ShareLink,
    ShareOptions,
};
use percent_encoding::percent_decode_str;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};

use crate::errors::ClientError;
use crate::multistatus::{normalize_path, parse_file_entries};
use crate::queries::{self, ADDRESSBOOK_QUERY, PROPFIND_BODY};
use crate::share::{parse_share, share_form};

const XML_CONTENT: &str = "application/xml; charset=utf-8";
const CALENDAR_CONTENT: &str = "text/calendar; charset=utf-8";
const VCARD_CONTENT: &str = "text/vcard; charset=utf-8";

/// Client for files, calendars, contacts and shares of one account.
///
/// Cloning is cheap; clones share the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct NextcloudClient {
    http: reqwest::Client,
    context: Arc<ConnectionContext>,
}

impl NextcloudClient {
    pub fn new(context: ConnectionContext) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("nextcloud-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::transport("initialise HTTP client", e))?;
        Ok(Self {
            http,
            context: Arc::new(context),
        })
    }

    pub fn context(&self) -> &ConnectionContext {
        &self.context
    }

    /// Lists the children of a directory. `path` is relative to the user's
    /// file root; `/` lists the root itself.
    pub async fn list_entries(&self, path: &str) -> Result<Vec<FileEntry>, ClientError> {
        const ACTION: &str = "list files";
        debug!("Listing directory '{}'", path);

        let request = self
            .request(dav_method("PROPFIND")?, self.file_url(path, true))
            .header("Depth", "1")
            .header(CONTENT_TYPE, XML_CONTENT)
            .body(PROPFIND_BODY);
        let response = check_status(ACTION, send(ACTION, request).await?, None)?;
        let body = read_text(ACTION, response).await?;

        let files_root = self.files_root_path();
        let entries = parse_file_entries(&body, &files_root, &normalize_path(path))
            .map_err(|e| ClientError::invalid_response(ACTION, e))?;
        debug!("Listed {} entries in '{}'", entries.len(), path);
        Ok(entries)
    }

    /// Returns the contents of a file as text.
    pub async fn read_entry(&self, path: &str) -> Result<String, ClientError> {
        const ACTION: &str = "read file";
        debug!("Reading file '{}'", path);

        let request = self.request(Method::GET, self.file_url(path, false));
        let response = check_status(ACTION, send(ACTION, request).await?, Some(path))?;
        read_text(ACTION, response).await
    }

    /// Creates or overwrites a file.
    pub async fn write_entry(&self, path: &str, content: &str) -> Result<(), ClientError> {
        const ACTION: &str = "upload file";
        debug!("Writing {} bytes to '{}'", content.len(), path);

        let request = self
            .request(Method::PUT, self.file_url(path, false))
            .body(content.to_string());
        check_status(ACTION, send(ACTION, request).await?, None)?;
        Ok(())
    }

    /// Deletes a file or directory.
    pub async fn remove_entry(&self, path: &str) -> Result<(), ClientError> {
        const ACTION: &str = "delete";
        debug!("Deleting '{}'", path);

        let request = self.request(Method::DELETE, self.file_url(path, false));
        check_status(ACTION, send(ACTION, request).await?, Some(path))?;
        Ok(())
    }

    /// Creates a public link share for a file or directory.
    pub async fn create_share(
        &self,
        path: &str,
        options: &ShareOptions,
    ) -> Result<ShareLink, ClientError> {
        const ACTION: &str = "create share";
        debug!("Creating public share for '{}'", path);

        let request = self
            .request(Method::POST, self.shares_url())
            .header("OCS-APIRequest", "true")
            .header(ACCEPT, "application/json")
            .form(&share_form(path, options));
        let response = check_status(ACTION, send(ACTION, request).await?, None)?;
        let body = read_text(ACTION, response).await?;

        parse_share(&body, path, options).map_err(|e| ClientError::invalid_response(ACTION, e))
    }

    /// Lists events of a calendar overlapping the given `YYYY-MM-DD` dates.
    pub async fn list_events(
        &self,
        calendar_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<EventRecord>, ClientError> {
        const ACTION: &str = "list calendar events";
        let (start, end) = queries::time_range(start_date, end_date);
        debug!("Listing events of '{}' from {} to {}", calendar_id, start, end);

        let request = self
            .request(dav_method("REPORT")?, self.calendar_url(calendar_id, None))
            .header("Depth", "1")
            .header(CONTENT_TYPE, XML_CONTENT)
            .body(queries::calendar_query(&start, &end));
        let response = check_status(ACTION, send(ACTION, request).await?, None)?;
        let body = read_text(ACTION, response).await?;

        Ok(decode_events(&body))
    }

    /// Stores a new event and returns its generated UID.
    pub async fn create_event(
        &self,
        calendar_id: &str,
        event: &NewEvent,
    ) -> Result<String, ClientError> {
        const ACTION: &str = "create event";
        let uid = generate_event_uid();
        debug!("Creating event '{}' in '{}'", uid, calendar_id);

        let resource = format!("{}.ics", uid);
        let request = self
            .request(Method::PUT, self.calendar_url(calendar_id, Some(&resource)))
            .header(CONTENT_TYPE, CALENDAR_CONTENT)
            .body(encode_event(&uid, event, Utc::now()));
        check_status(ACTION, send(ACTION, request).await?, None)?;
        Ok(uid)
    }

    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), ClientError> {
        const ACTION: &str = "delete event";
        debug!("Deleting event '{}' from '{}'", event_id, calendar_id);

        let resource = format!("{}.ics", event_id);
        let request = self.request(Method::DELETE, self.calendar_url(calendar_id, Some(&resource)));
        check_status(ACTION, send(ACTION, request).await?, Some(event_id))?;
        Ok(())
    }

    pub async fn list_contacts(
        &self,
        address_book_id: &str,
    ) -> Result<Vec<ContactRecord>, ClientError> {
        const ACTION: &str = "list contacts";
        debug!("Listing contacts of '{}'", address_book_id);

        let request = self
            .request(dav_method("REPORT")?, self.address_book_url(address_book_id, None))
            .header("Depth", "1")
            .header(CONTENT_TYPE, XML_CONTENT)
            .body(ADDRESSBOOK_QUERY);
        let response = check_status(ACTION, send(ACTION, request).await?, None)?;
        let body = read_text(ACTION, response).await?;

        Ok(decode_contacts(&body))
    }

    /// Fetches one contact. A card without a UID gets `contact_id` as UID.
    pub async fn get_contact(
        &self,
        address_book_id: &str,
        contact_id: &str,
    ) -> Result<ContactRecord, ClientError> {
        const ACTION: &str = "get contact";
        debug!("Fetching contact '{}' from '{}'", contact_id, address_book_id);

        let resource = format!("{}.vcf", contact_id);
        let request = self.request(
            Method::GET,
            self.address_book_url(address_book_id, Some(&resource)),
        );
        let response = check_status(ACTION, send(ACTION, request).await?, Some(contact_id))?;
        let body = read_text(ACTION, response).await?;

        Ok(decode_contact_or(&body, contact_id))
    }

    /// Stores a new contact and returns its generated UID.
    pub async fn create_contact(
        &self,
        address_book_id: &str,
        contact: &NewContact,
    ) -> Result<String, ClientError> {
        const ACTION: &str = "create contact";
        let uid = generate_uid();
        debug!("Creating contact '{}' in '{}'", uid, address_book_id);

        let resource = format!("{}.vcf", uid);
        let request = self
            .request(
                Method::PUT,
                self.address_book_url(address_book_id, Some(&resource)),
            )
            .header(CONTENT_TYPE, VCARD_CONTENT)
            .body(encode_contact(&uid, contact));
        check_status(ACTION, send(ACTION, request).await?, None)?;
        Ok(uid)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(self.context.username(), Some(self.context.password()))
    }

    fn file_url(&self, path: &str, collection: bool) -> Url {
        let user = self.context.username();
        let segments = ["remote.php", "dav", "files", user]
            .into_iter()
            .chain(path.split('/'));
        self.context.endpoint(segments, collection)
    }

    fn calendar_url(&self, calendar_id: &str, resource: Option<&str>) -> Url {
        let user = self.context.username();
        let segments = ["remote.php", "dav", "calendars", user, calendar_id];
        match resource {
            Some(resource) => self
                .context
                .endpoint(segments.into_iter().chain([resource]), false),
            None => self.context.endpoint(segments, true),
        }
    }

    fn address_book_url(&self, address_book_id: &str, resource: Option<&str>) -> Url {
        let user = self.context.username();
        let segments = ["remote.php", "dav", "addressbooks", "users", user, address_book_id];
        match resource {
            Some(resource) => self
                .context
                .endpoint(segments.into_iter().chain([resource]), false),
            None => self.context.endpoint(segments, true),
        }
    }

    fn shares_url(&self) -> Url {
        self.context.endpoint(
            ["ocs", "v2.php", "apps", "files_sharing", "api", "v1", "shares"],
            false,
        )
    }

    /// Decoded URL path of the user's file root, as hrefs report it.
    fn files_root_path(&self) -> String {
        let url = self.file_url("", false);
        percent_decode_str(url.path()).decode_utf8_lossy().into_owned()
    }
}

fn dav_method(name: &'static str) -> Result<Method, ClientError> {
    Method::from_bytes(name.as_bytes()).map_err(|e| ClientError::transport("build request", e))
}

async fn send(action: &'static str, request: RequestBuilder) -> Result<Response, ClientError> {
    request
        .send()
        .await
        .map_err(|e| ClientError::transport(action, e))
}

/// Maps non-success statuses. A 404 becomes [`ClientError::NotFound`] only
/// when the call addresses a single named resource.
fn check_status(
    action: &'static str,
    response: Response,
    resource: Option<&str>,
) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    debug!("Failed to {}: HTTP {}", action, status);
    match (status, resource) {
        (StatusCode::NOT_FOUND, Some(resource)) => Err(ClientError::NotFound(resource.to_string())),
        _ => Err(ClientError::from_status(action, status)),
    }
}

async fn read_text(action: &'static str, response: Response) -> Result<String, ClientError> {
    response
        .text()
        .await
        .map_err(|e| ClientError::invalid_response(action, e))
}
