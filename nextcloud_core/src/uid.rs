//! Identifiers for newly created records.
//!
//! A UID is the current time in milliseconds followed by a random base36
//! suffix. Uniqueness is probabilistic; nothing checks the server for an
//! existing resource with the same name.

use chrono::Utc;
use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 11;

/// Domain appended to event UIDs.
pub const EVENT_UID_DOMAIN: &str = "nextcloud-mcp";

/// Generates a UID of the form `<unix millis>-<random base36>`.
pub fn generate_uid() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Generates an event UID, which carries a domain part as iCalendar recommends.
pub fn generate_event_uid() -> String {
    format!("{}@{}", generate_uid(), EVENT_UID_DOMAIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uids_are_unique() {
        let uids: HashSet<String> = (0..10_000).map(|_| generate_uid()).collect();
        assert_eq!(uids.len(), 10_000);
    }

    #[test]
    fn test_uid_shape() {
        let uid = generate_uid();
        let (millis, suffix) = uid.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_event_uid_has_domain() {
        assert!(generate_event_uid().ends_with("@nextcloud-mcp"));
    }
}
