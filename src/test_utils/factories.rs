//! Test data factories for creating valid test fixtures.
//!
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::waitlist_entry::{EntryStatus, WaitlistEntry};

/// Create a pending waitlist entry signed up at `test_datetime()`.
pub fn create_test_entry(overrides: impl FnOnce(&mut WaitlistEntry)) -> WaitlistEntry {
    let mut entry = WaitlistEntry {
        id: Uuid::new_v4(),
        email: "someone@example.com".to_string(),
        created_at: test_datetime(),
        status: EntryStatus::Pending,
    };
    overrides(&mut entry);
    entry
}

/// Returns a fixed UTC datetime for reproducible tests.
pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Returns `test_datetime()` offset by the given number of days.
pub fn test_datetime_offset_days(days: i64) -> DateTime<Utc> {
    test_datetime() + chrono::Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply() {
        let entry = create_test_entry(|e| e.email = "x@y.com".to_string());
        assert_eq!(entry.email, "x@y.com");
        assert_eq!(entry.status, EntryStatus::Pending);
        assert_eq!(entry.created_at, test_datetime());
    }

    #[test]
    fn offset_days_moves_backwards() {
        assert!(test_datetime_offset_days(-1) < test_datetime());
    }
}
