//! vCard contact encoding and decoding.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::extract::{
    block_pattern, data_blocks, escape_value, field, text_field, write_record,
};
use crate::model::{ContactRecord, NewContact};

static ADDRESS_DATA: LazyLock<Regex> = LazyLock::new(|| block_pattern("address-data"));

/// Derives the structured `N` value from a full name.
///
/// Whitespace separated tokens are reversed, so `Ada Lovelace` becomes
/// `Lovelace;Ada;;;`. This is a heuristic and does not know about
/// prefixes, suffixes or multi-word surnames.
pub fn structured_name(full_name: &str) -> String {
    let tokens: Vec<&str> = full_name.split_whitespace().rev().collect();
    format!("{};;;", tokens.join(";"))
}

/// Encodes a contact as a vCard 3.0 object.
pub fn encode_contact(uid: &str, contact: &NewContact) -> String {
    write_record(
        "VCARD",
        &[
            ("VERSION", Some("3.0".to_string())),
            ("UID", Some(uid.to_string())),
            ("FN", Some(escape_value(&contact.full_name))),
            ("N", Some(escape_value(&structured_name(&contact.full_name)))),
            ("EMAIL", contact.email.as_deref().map(escape_value)),
            ("TEL", contact.phone.as_deref().map(escape_value)),
            ("ORG", contact.organization.as_deref().map(escape_value)),
            ("NOTE", contact.note.as_deref().map(escape_value)),
        ],
    )
}

fn decode_with_uid(text: &str, uid: String) -> ContactRecord {
    ContactRecord {
        uid,
        full_name: text_field(text, "FN").unwrap_or_default(),
        email: field(text, "EMAIL").map(String::from),
        phone: field(text, "TEL").map(String::from),
        organization: text_field(text, "ORG"),
        note: text_field(text, "NOTE"),
        raw: text.to_string(),
    }
}

/// Decodes one vCard. Returns `None` when it has no UID.
pub fn decode_contact(text: &str) -> Option<ContactRecord> {
    let uid = field(text, "UID")?.to_string();
    Some(decode_with_uid(text, uid))
}

/// Decodes one vCard, using `fallback_uid` when the card has no UID.
pub fn decode_contact_or(text: &str, fallback_uid: &str) -> ContactRecord {
    let uid = field(text, "UID").unwrap_or(fallback_uid).to_string();
    decode_with_uid(text, uid)
}

/// Decodes every `address-data` block of an `addressbook-query` response.
pub fn decode_contacts(multistatus: &str) -> Vec<ContactRecord> {
    data_blocks(&ADDRESS_DATA, multistatus)
        .iter()
        .filter_map(|block| {
            let record = decode_contact(block);
            if record.is_none() {
                debug!("Skipping address book block without UID");
            }
            record
        })
        .collect()
}
