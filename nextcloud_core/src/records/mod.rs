//! Line-oriented record codec for iCalendar events and vCard contacts.
//!
//! Encoding goes through an ordered field table so the output is
//! deterministic. Decoding scans multistatus bodies for data blocks and
//! pulls single-line properties out of each block; blocks without a UID
//! are dropped.

pub mod calendar;
pub mod contact;
pub mod extract;

pub use calendar::{decode_event, decode_events, encode_event};
pub use contact::{
    decode_contact, decode_contact_or, decode_contacts, encode_contact, structured_name,
};

/// Line terminator used for every emitted record.
pub const LINE_TERMINATOR: &str = "\r\n";
