//! Calendar tools.

use std::sync::Arc;

use log::debug;
use nextcloud_core::{EventRecord, NewEvent};
use nextcloud_dav::NextcloudClient;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::catalog::{ToolModule, ToolSpec};
use crate::errors::ToolError;
use crate::pipeline::{
    Validate, ValidationError, require_date, require_date_time, require_non_empty,
};

fn default_calendar() -> String {
    "personal".to_string()
}

/// Parameters for the list events tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsParams {
    /// Calendar ID (default: personal)
    #[serde(default = "default_calendar")]
    pub calendar_id: String,
    /// Start date filter (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date filter (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Validate for ListEventsParams {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(date) = &self.start_date {
            require_date("startDate", date)?;
        }
        if let Some(date) = &self.end_date {
            require_date("endDate", date)?;
        }
        Ok(())
    }
}

/// Parameters for the create event tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventParams {
    /// Calendar ID (default: personal)
    #[serde(default = "default_calendar")]
    pub calendar_id: String,
    /// Event title
    pub summary: String,
    /// Event description
    #[serde(default)]
    pub description: Option<String>,
    /// Start datetime (ISO 8601, e.g., 2024-01-15T10:00:00)
    pub start: String,
    /// End datetime (ISO 8601, e.g., 2024-01-15T11:00:00)
    pub end: String,
    /// Event location
    #[serde(default)]
    pub location: Option<String>,
}

impl Validate for CreateEventParams {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("summary", &self.summary)?;
        require_date_time("start", &self.start)?;
        require_date_time("end", &self.end)
    }
}

/// Parameters for the delete event tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEventParams {
    /// Calendar ID
    pub calendar_id: String,
    /// Event UID to delete
    pub event_id: String,
}

impl Validate for DeleteEventParams {}

#[derive(Debug, Serialize)]
pub struct CreatedEvent {
    pub uid: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedEvent {
    pub event_id: String,
    pub message: &'static str,
}

pub async fn list_events(
    client: &NextcloudClient,
    params: ListEventsParams,
) -> Result<Vec<EventRecord>, ToolError> {
    debug!(
        "Tool: nextcloud_list_events, calendar_id={}, start_date={:?}, end_date={:?}",
        params.calendar_id, params.start_date, params.end_date
    );
    Ok(client
        .list_events(
            &params.calendar_id,
            params.start_date.as_deref(),
            params.end_date.as_deref(),
        )
        .await?)
}

pub async fn create_event(
    client: &NextcloudClient,
    params: CreateEventParams,
) -> Result<CreatedEvent, ToolError> {
    debug!(
        "Tool: nextcloud_create_event, calendar_id={}, summary={}",
        params.calendar_id, params.summary
    );
    let event = NewEvent {
        summary: params.summary,
        description: params.description,
        start: params.start,
        end: params.end,
        location: params.location,
    };
    let uid = client.create_event(&params.calendar_id, &event).await?;
    Ok(CreatedEvent {
        uid,
        message: "Event created successfully",
    })
}

pub async fn delete_event(
    client: &NextcloudClient,
    params: DeleteEventParams,
) -> Result<DeletedEvent, ToolError> {
    debug!(
        "Tool: nextcloud_delete_event, calendar_id={}, event_id={}",
        params.calendar_id, params.event_id
    );
    client
        .delete_event(&params.calendar_id, &params.event_id)
        .await?;
    Ok(DeletedEvent {
        event_id: params.event_id,
        message: "Event deleted successfully",
    })
}

pub fn module(client: Arc<NextcloudClient>) -> ToolModule {
    let list = client.clone();
    let create = client.clone();
    let remove = client;

    ToolModule::new("calendar")
        .with_tool(ToolSpec::new(
            "nextcloud_list_events",
            "List calendar events from Nextcloud",
            move |params: ListEventsParams| {
                let client = list.clone();
                async move { list_events(&client, params).await }
            },
        ))
        .with_tool(ToolSpec::new(
            "nextcloud_create_event",
            "Create a calendar event in Nextcloud",
            move |params: CreateEventParams| {
                let client = create.clone();
                async move { create_event(&client, params).await }
            },
        ))
        .with_tool(ToolSpec::new(
            "nextcloud_delete_event",
            "Delete a calendar event from Nextcloud",
            move |params: DeleteEventParams| {
                let client = remove.clone();
                async move { delete_event(&client, params).await }
            },
        ))
}
