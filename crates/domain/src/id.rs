//! ID generation utilities.
//!
//! Requests use random UUIDs. Folders use a decimal token derived from the
//! creation time in epoch milliseconds, bumped forward when two folders are
//! created within the same millisecond so tokens never repeat.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generates a new random UUID v4 string for a saved request.
#[must_use]
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Issues strictly increasing, time-derived folder identifiers.
#[derive(Debug, Clone, Default)]
pub struct FolderIdGenerator {
    last: i64,
}

impl FolderIdGenerator {
    /// Creates a generator that has not issued anything yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Records an identifier that already exists so later tokens sort after it.
    ///
    /// Identifiers that are not decimal tokens are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<i64>() {
            self.last = self.last.max(value);
        }
    }

    /// Returns the next identifier for a folder created at `now`.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis();
        self.last = if candidate > self.last {
            candidate
        } else {
            self.last + 1
        };
        self.last.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_id_format() {
        let id = generate_request_id();
        assert_eq!(id.len(), 36);
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_generate_request_id_uniqueness() {
        assert_ne!(generate_request_id(), generate_request_id());
    }

    #[test]
    fn test_folder_ids_use_creation_millis() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let mut ids = FolderIdGenerator::new();
        assert_eq!(ids.next_id(now), "1700000000123");
    }

    #[test]
    fn test_folder_ids_within_same_millisecond_are_distinct() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let mut ids = FolderIdGenerator::new();
        let first = ids.next_id(now);
        let second = ids.next_id(now);
        assert_ne!(first, second);
        assert_eq!(second, "1700000000001");
    }

    #[test]
    fn test_observed_ids_are_never_reissued() {
        let now = DateTime::from_timestamp_millis(1_000).unwrap();
        let mut ids = FolderIdGenerator::new();
        ids.observe("5000");
        ids.observe("not-a-number");
        assert_eq!(ids.next_id(now), "5001");
    }
}
