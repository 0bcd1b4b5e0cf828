//! File tools: listing, reading, uploading, deleting and sharing.

use std::sync::Arc;

use log::debug;
use nextcloud_core::{FileEntry, ShareLink, ShareOptions};
use nextcloud_dav::NextcloudClient;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::catalog::{ToolModule, ToolSpec};
use crate::errors::ToolError;
use crate::pipeline::{Validate, ValidationError, require_date, require_non_empty};

fn default_root() -> String {
    "/".to_string()
}

/// Parameters for the list files tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFilesParams {
    /// Directory path to list (default: /)
    #[serde(default = "default_root")]
    pub path: String,
}

impl Validate for ListFilesParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("path", &self.path)
    }
}

/// Parameters for the read file tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadFileParams {
    /// Path to the file to read
    pub path: String,
}

impl Validate for ReadFileParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("path", &self.path)
    }
}

/// Parameters for the upload file tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UploadFileParams {
    /// Destination path for the file
    pub path: String,
    /// File content to upload
    pub content: String,
}

impl Validate for UploadFileParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("path", &self.path)
    }
}

/// Parameters for the delete tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteParams {
    /// Path to delete
    pub path: String,
}

impl Validate for DeleteParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("path", &self.path)
    }
}

/// Parameters for the create share tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareParams {
    /// Path to share
    pub path: String,
    /// Optional password for the share
    #[serde(default)]
    pub password: Option<String>,
    /// Optional expiration date (YYYY-MM-DD)
    #[serde(default)]
    pub expire_date: Option<String>,
}

impl Validate for CreateShareParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("path", &self.path)?;
        if let Some(date) = &self.expire_date {
            require_date("expireDate", date)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct FileContent {
    pub path: String,
    pub content: String,
}

/// Confirmation payload for mutating file operations.
#[derive(Debug, Serialize)]
pub struct PathMessage {
    pub path: String,
    pub message: &'static str,
}

pub async fn list_files(
    client: &NextcloudClient,
    params: ListFilesParams,
) -> Result<Vec<FileEntry>, ToolError> {
    debug!("Tool: nextcloud_list_files, path={}", params.path);
    Ok(client.list_entries(&params.path).await?)
}

pub async fn read_file(
    client: &NextcloudClient,
    params: ReadFileParams,
) -> Result<FileContent, ToolError> {
    debug!("Tool: nextcloud_read_file, path={}", params.path);
    let content = client.read_entry(&params.path).await?;
    Ok(FileContent {
        path: params.path,
        content,
    })
}

pub async fn upload_file(
    client: &NextcloudClient,
    params: UploadFileParams,
) -> Result<PathMessage, ToolError> {
    debug!(
        "Tool: nextcloud_upload_file, path={}, content_len={}",
        params.path,
        params.content.len()
    );
    client.write_entry(&params.path, &params.content).await?;
    Ok(PathMessage {
        path: params.path,
        message: "File uploaded successfully",
    })
}

pub async fn delete(
    client: &NextcloudClient,
    params: DeleteParams,
) -> Result<PathMessage, ToolError> {
    debug!("Tool: nextcloud_delete, path={}", params.path);
    client.remove_entry(&params.path).await?;
    Ok(PathMessage {
        path: params.path,
        message: "Deleted successfully",
    })
}

pub async fn create_share(
    client: &NextcloudClient,
    params: CreateShareParams,
) -> Result<ShareLink, ToolError> {
    debug!(
        "Tool: nextcloud_create_share, path={}, password={}, expire_date={:?}",
        params.path,
        params.password.is_some(),
        params.expire_date
    );
    let options = ShareOptions {
        password: params.password,
        expire_date: params.expire_date,
    };
    Ok(client.create_share(&params.path, &options).await?)
}

pub fn module(client: Arc<NextcloudClient>) -> ToolModule {
    let list = client.clone();
    let read = client.clone();
    let upload = client.clone();
    let remove = client.clone();
    let share = client;

    ToolModule::new("files")
        .with_tool(ToolSpec::new(
            "nextcloud_list_files",
            "List files and folders in a Nextcloud directory",
            move |params: ListFilesParams| {
                let client = list.clone();
                async move { list_files(&client, params).await }
            },
        ))
        .with_tool(ToolSpec::new(
            "nextcloud_read_file",
            "Read the contents of a text file from Nextcloud",
            move |params: ReadFileParams| {
                let client = read.clone();
                async move { read_file(&client, params).await }
            },
        ))
        .with_tool(ToolSpec::new(
            "nextcloud_upload_file",
            "Upload a file to Nextcloud",
            move |params: UploadFileParams| {
                let client = upload.clone();
                async move { upload_file(&client, params).await }
            },
        ))
        .with_tool(ToolSpec::new(
            "nextcloud_delete",
            "Delete a file or folder from Nextcloud",
            move |params: DeleteParams| {
                let client = remove.clone();
                async move { delete(&client, params).await }
            },
        ))
        .with_tool(ToolSpec::new(
            "nextcloud_create_share",
            "Create a public share link for a file or folder",
            move |params: CreateShareParams| {
                let client = share.clone();
                async move { create_share(&client, params).await }
            },
        ))
}
