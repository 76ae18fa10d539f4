//! In-memory doubles for the waitlist store and the rate limiter.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::{EntryStatus, WaitlistEntry},
    infra::RateLimiterTrait,
    use_cases::waitlist::{StoreError, WaitlistRepo},
};

// ============================================================================
// InMemoryWaitlistRepo
// ============================================================================

/// In-memory waitlist table with a unique email column.
/// Counts calls so tests can assert whether the store was reached.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    entries: Mutex<Vec<WaitlistEntry>>,
    next_failure: Mutex<Option<StoreError>>,
    insert_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Make the next store call (insert or list) fail with `error`.
    pub fn fail_next_with(&self, error: StoreError) {
        *self.next_failure.lock().unwrap() = Some(error);
    }

    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> Result<(), StoreError> {
        match self.next_failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, email: &str) -> Result<WaitlistEntry, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let mut entries = self.entries.lock().unwrap();
        // Exact comparison, like the unique index on the real table.
        if entries.iter().any(|e| e.email == email) {
            return Err(StoreError::UniqueViolation);
        }

        // Keep created_at strictly increasing so insertion order is observable.
        let now = Utc::now();
        let created_at = entries
            .iter()
            .map(|e| e.created_at)
            .max()
            .map_or(now, |latest| now.max(latest + chrono::Duration::microseconds(1)));

        let entry = WaitlistEntry {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at,
            status: EntryStatus::Pending,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_newest_first(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let mut entries = self.entries.lock().unwrap().clone();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }
}

// ============================================================================
// InMemoryRateLimiter
// ============================================================================

/// In-memory rate limiter for testing.
/// Uses HashMap to track request counts per IP.
pub struct InMemoryRateLimiter {
    counts: Mutex<HashMap<String, u64>>,
    max_per_ip: u64,
}

impl InMemoryRateLimiter {
    pub fn new(max_per_ip: u64) -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
            max_per_ip,
        }
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check(&self, ip: &str) -> AppResult<()> {
        let mut counts = self.counts.lock().unwrap();

        let count = counts.entry(format!("rate:ip:{ip}")).or_insert(0);
        *count += 1;
        if *count > self.max_per_ip {
            return Err(AppError::RateLimited);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_entry;

    #[tokio::test]
    async fn duplicate_email_is_unique_violation() {
        let repo = InMemoryWaitlistRepo::new();

        repo.insert("a@example.com").await.unwrap();
        let second = repo.insert("a@example.com").await;

        assert_eq!(second, Err(StoreError::UniqueViolation));
        // Case differs, so the unique index does not fire.
        repo.insert("A@example.com").await.unwrap();
        assert_eq!(repo.get_all().len(), 2);
    }

    #[tokio::test]
    async fn inserts_after_seeded_entries_sort_first() {
        let seeded = create_test_entry(|e| e.created_at = Utc::now() + chrono::Duration::hours(1));
        let repo = InMemoryWaitlistRepo::with_entries(vec![seeded]);

        let inserted = repo.insert("late@example.com").await.unwrap();
        let listed = repo.list_newest_first().await.unwrap();

        assert_eq!(listed[0].id, inserted.id);
    }

    #[tokio::test]
    async fn failure_is_consumed_once() {
        let repo = InMemoryWaitlistRepo::new();
        repo.fail_next_with(StoreError::transport("boom"));

        assert!(repo.list_newest_first().await.is_err());
        assert!(repo.list_newest_first().await.is_ok());
        assert_eq!(repo.list_calls(), 2);
    }

    #[tokio::test]
    async fn rate_limiter_counts_per_ip() {
        let limiter = InMemoryRateLimiter::new(1);

        limiter.check("1.1.1.1").await.unwrap();
        assert!(matches!(
            limiter.check("1.1.1.1").await,
            Err(AppError::RateLimited)
        ));
        limiter.check("2.2.2.2").await.unwrap();
    }
}
