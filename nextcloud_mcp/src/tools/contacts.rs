//! Contact tools.

use std::sync::Arc;

use log::debug;
use nextcloud_core::{ContactRecord, NewContact};
use nextcloud_dav::NextcloudClient;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::catalog::{ToolModule, ToolSpec};
use crate::errors::ToolError;
use crate::pipeline::{Validate, ValidationError, require_email, require_non_empty};

fn default_address_book() -> String {
    "contacts".to_string()
}

/// Parameters for the list contacts tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListContactsParams {
    /// Address book ID (default: contacts)
    #[serde(default = "default_address_book")]
    pub address_book_id: String,
}

impl Validate for ListContactsParams {}

/// Parameters for the get contact tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetContactParams {
    /// Address book ID (default: contacts)
    #[serde(default = "default_address_book")]
    pub address_book_id: String,
    /// Contact UID
    pub contact_id: String,
}

impl Validate for GetContactParams {}

/// Parameters for the create contact tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactParams {
    /// Address book ID (default: contacts)
    #[serde(default = "default_address_book")]
    pub address_book_id: String,
    /// Full name of the contact
    pub full_name: String,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Organization/company
    #[serde(default)]
    pub organization: Option<String>,
    /// Notes
    #[serde(default)]
    pub note: Option<String>,
}

impl Validate for CreateContactParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("fullName", &self.full_name)?;
        if let Some(email) = &self.email {
            require_email("email", email)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedContact {
    pub uid: String,
    pub message: &'static str,
}

pub async fn list_contacts(
    client: &NextcloudClient,
    params: ListContactsParams,
) -> Result<Vec<ContactRecord>, ToolError> {
    debug!(
        "Tool: nextcloud_list_contacts, address_book_id={}",
        params.address_book_id
    );
    Ok(client.list_contacts(&params.address_book_id).await?)
}

pub async fn get_contact(
    client: &NextcloudClient,
    params: GetContactParams,
) -> Result<ContactRecord, ToolError> {
    debug!(
        "Tool: nextcloud_get_contact, address_book_id={}, contact_id={}",
        params.address_book_id, params.contact_id
    );
    Ok(client
        .get_contact(&params.address_book_id, &params.contact_id)
        .await?)
}

pub async fn create_contact(
    client: &NextcloudClient,
    params: CreateContactParams,
) -> Result<CreatedContact, ToolError> {
    debug!(
        "Tool: nextcloud_create_contact, address_book_id={}, full_name={}",
        params.address_book_id, params.full_name
    );
    let contact = NewContact {
        full_name: params.full_name,
        email: params.email,
        phone: params.phone,
        organization: params.organization,
        note: params.note,
    };
    let uid = client
        .create_contact(&params.address_book_id, &contact)
        .await?;
    Ok(CreatedContact {
        uid,
        message: "Contact created successfully",
    })
}

pub fn module(client: Arc<NextcloudClient>) -> ToolModule {
    let list = client.clone();
    let get = client.clone();
    let create = client;

    ToolModule::new("contacts")
        .with_tool(ToolSpec::new(
            "nextcloud_list_contacts",
            "List contacts from Nextcloud address book",
            move |params: ListContactsParams| {
                let client = list.clone();
                async move { list_contacts(&client, params).await }
            },
        ))
        .with_tool(ToolSpec::new(
            "nextcloud_get_contact",
            "Get details of a specific contact",
            move |params: GetContactParams| {
                let client = get.clone();
                async move { get_contact(&client, params).await }
            },
        ))
        .with_tool(ToolSpec::new(
            "nextcloud_create_contact",
            "Create a new contact in Nextcloud",
            move |params: CreateContactParams| {
                let client = create.clone();
                async move { create_contact(&client, params).await }
            },
        ))
}
