//! Values exchanged with the Nextcloud server.
//!
//! All of these are plain data. Entries and records are always derived
//! fresh from a server response and never cached.

use serde::{Deserialize, Serialize};

/// Whether a listed entry is a file or a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Full path relative to the user's file root, e.g. `/docs/report.pdf`.
    pub filename: String,
    /// Last path segment, e.g. `report.pdf`.
    pub basename: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub size: u64,
    pub lastmod: String,
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

/// A public share link created through the OCS share API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareLink {
    pub id: String,
    pub url: String,
    pub token: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    pub password: bool,
}

/// Options accepted when creating a share.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShareOptions {
    pub password: Option<String>,
    /// Expiration date in `YYYY-MM-DD` form.
    pub expire_date: Option<String>,
}

/// A calendar event decoded from an iCalendar block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub uid: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// The unescaped iCalendar text the record was read from.
    pub raw: String,
}

/// Fields for a new calendar event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub summary: String,
    pub description: Option<String>,
    /// ISO 8601 date-time, e.g. `2024-01-15T10:00:00`.
    pub start: String,
    pub end: String,
    pub location: Option<String>,
}

/// A contact decoded from a vCard block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub uid: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub raw: String,
}

/// Fields for a new contact.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub note: Option<String>,
}
