//! UUID v7 utilities for time-ordered identifiers.
//!
//! Custom persona ids and event ids are UUIDv7 so that they sort by creation
//! time. Persona ids travel as opaque strings on the wire.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Generate a new persona id (UUIDv7 rendered as a hyphenated string).
pub fn new_persona_id() -> String {
    new_v7().to_string()
}

/// Extract the embedded creation timestamp from a UUIDv7.
///
/// Returns `None` for UUIDs of other versions.
pub fn extract_timestamp(id: &Uuid) -> Option<DateTime<Utc>> {
    if !is_v7(id) {
        return None;
    }
    let bytes = id.as_bytes();
    let millis = bytes[..6]
        .iter()
        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Check whether a UUID is version 7.
pub fn is_v7(id: &Uuid) -> bool {
    id.get_version_num() == 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_v7_is_v7() {
        assert!(is_v7(&new_v7()));
        assert!(!is_v7(&Uuid::new_v4()));
    }

    #[test]
    fn test_persona_id_parses_back() {
        let id = new_persona_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert!(is_v7(&parsed));
    }

    #[test]
    fn test_extract_timestamp_close_to_now() {
        let before = Utc::now().timestamp_millis();
        let ts = extract_timestamp(&new_v7()).unwrap().timestamp_millis();
        let after = Utc::now().timestamp_millis();
        assert!(ts >= before - 1 && ts <= after + 1);
    }

    #[test]
    fn test_extract_timestamp_rejects_v4() {
        assert!(extract_timestamp(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_v7_ordering() {
        let a = new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = new_v7();
        assert!(a < b);
    }
}
