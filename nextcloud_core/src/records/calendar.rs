//! iCalendar event encoding and decoding.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use log::debug;
use regex::Regex;

use super::extract::{
    block_pattern, compact_timestamp, component, data_blocks, escape_value, field, text_field,
    write_record,
};
use super::LINE_TERMINATOR;
use crate::model::{EventRecord, NewEvent};

/// Product identifier written into every calendar object.
pub const PRODUCT_ID: &str = "-//Nextcloud MCP//EN";

static CALENDAR_DATA: LazyLock<Regex> = LazyLock::new(|| block_pattern("calendar-data"));

/// Encodes a single event as a complete `VCALENDAR` object.
///
/// `stamp` becomes `DTSTAMP`; callers pass the current time.
pub fn encode_event(uid: &str, event: &NewEvent, stamp: DateTime<Utc>) -> String {
    let vevent = write_record(
        "VEVENT",
        &[
            ("UID", Some(uid.to_string())),
            ("DTSTAMP", Some(stamp.format("%Y%m%dT%H%M%SZ").to_string())),
            ("DTSTART", Some(compact_timestamp(&event.start))),
            ("DTEND", Some(compact_timestamp(&event.end))),
            ("SUMMARY", Some(escape_value(&event.summary))),
            ("DESCRIPTION", event.description.as_deref().map(escape_value)),
            ("LOCATION", event.location.as_deref().map(escape_value)),
        ],
    );

    let product = format!("PRODID:{}", PRODUCT_ID);
    [
        "BEGIN:VCALENDAR",
        "VERSION:2.0",
        product.as_str(),
        vevent.as_str(),
        "END:VCALENDAR",
    ]
    .join(LINE_TERMINATOR)
}

/// Decodes one iCalendar object. Returns `None` when it has no UID.
///
/// Properties are read from the first `VEVENT` so that `VTIMEZONE`
/// definitions earlier in the object do not shadow them.
pub fn decode_event(text: &str) -> Option<EventRecord> {
    let vevent = component(text, "VEVENT");
    let uid = field(vevent, "UID")?;

    Some(EventRecord {
        uid: uid.to_string(),
        summary: text_field(vevent, "SUMMARY").unwrap_or_default(),
        description: text_field(vevent, "DESCRIPTION"),
        start: field(vevent, "DTSTART").unwrap_or_default().to_string(),
        end: field(vevent, "DTEND").unwrap_or_default().to_string(),
        location: text_field(vevent, "LOCATION"),
        raw: text.to_string(),
    })
}

/// Decodes every `calendar-data` block of a `calendar-query` response.
pub fn decode_events(multistatus: &str) -> Vec<EventRecord> {
    data_blocks(&CALENDAR_DATA, multistatus)
        .iter()
        .filter_map(|block| {
            let record = decode_event(block);
            if record.is_none() {
                debug!("Skipping calendar block without UID");
            }
            record
        })
        .collect()
}
