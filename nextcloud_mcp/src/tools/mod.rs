//! MCP tool modules for Nextcloud.
//!
//! Each module declares its parameter types, the functions executing its
//! tools and a `module` constructor contributing them to the catalog.

pub mod calendar;
pub mod contacts;
pub mod files;

use std::sync::Arc;

use nextcloud_dav::NextcloudClient;

use crate::catalog::ToolCatalog;

/// Catalog with every Nextcloud tool: files, then calendar, then contacts.
pub fn default_catalog(client: Arc<NextcloudClient>) -> ToolCatalog {
    ToolCatalog::new()
        .with_module(files::module(client.clone()))
        .with_module(calendar::module(client.clone()))
        .with_module(contacts::module(client))
}
