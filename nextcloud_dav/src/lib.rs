//! Remote resource client for a Nextcloud account.
//!
//! One authenticated HTTP channel carries three protocols: WebDAV for
//! files, CalDAV `calendar-query` reports for events and CardDAV
//! `addressbook-query` reports for contacts, plus the OCS share API.
//! Callers only see domain operations on [`NextcloudClient`].

mod client;
mod errors;
pub mod multistatus;
pub mod queries;
pub mod share;

pub use client::NextcloudClient;
pub use errors::ClientError;
