//! Core data structures and record codec for the Nextcloud MCP connector.
//!
//! Everything in this crate is pure: the remote client lives in
//! `nextcloud_dav` and the MCP surface in `nextcloud_mcp`.

pub mod connection;
pub mod model;
pub mod records;
pub mod uid;

pub use connection::{ConnectionContext, ConnectionError};
pub use model::{
    ContactRecord, EventRecord, FileEntry, FileKind, NewContact, NewEvent, ShareLink,
    ShareOptions,
};
