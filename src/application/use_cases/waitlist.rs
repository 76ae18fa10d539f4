use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::instrument;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::waitlist_entry::WaitlistEntry;

/// PostgreSQL `unique_violation`.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

// ============================================================================
// Store Boundary
// ============================================================================

/// Failure kinds reported by a [`WaitlistRepo`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("store rejected the request (code {code:?}): {message:?}")]
    Backend {
        code: Option<String>,
        message: Option<String>,
    },

    #[error("store unreachable or returned a malformed response: {message:?}")]
    Transport { message: Option<String> },
}

impl StoreError {
    /// Classifies a structured store error by its code.
    pub fn from_code(code: Option<&str>, message: Option<String>) -> Self {
        if code == Some(UNIQUE_VIOLATION_CODE) {
            StoreError::UniqueViolation
        } else {
            StoreError::Backend {
                code: code.map(str::to_string),
                message,
            }
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        StoreError::Transport {
            message: Some(message.into()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation => AppError::DuplicateEmail,
            StoreError::Backend { message, .. } => AppError::Store(non_empty(message)),
            StoreError::Transport { message } => AppError::Unexpected(non_empty(message)),
        }
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Insert `{email}` and return the stored row.
    async fn insert(&self, email: &str) -> Result<WaitlistEntry, StoreError>;

    /// Every row, ordered by `created_at` descending.
    async fn list_newest_first(&self) -> Result<Vec<WaitlistEntry>, StoreError>;
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Option<Arc<dyn WaitlistRepo>>,
}

impl WaitlistUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>) -> Self {
        Self { repo: Some(repo) }
    }

    /// No store configured: every operation fails with `StoreNotConfigured`.
    pub fn unconfigured() -> Self {
        Self { repo: None }
    }

    pub fn is_configured(&self) -> bool {
        self.repo.is_some()
    }

    fn repo(&self) -> AppResult<&Arc<dyn WaitlistRepo>> {
        self.repo.as_ref().ok_or(AppError::StoreNotConfigured)
    }

    /// Adds one email to the waitlist. Callers check the address shape first.
    ///
    /// A single insert attempt; failures are returned, never retried.
    #[instrument(skip(self, email))]
    pub async fn submit(&self, email: &str) -> AppResult<()> {
        let repo = self.repo()?;

        match repo.insert(email).await {
            Ok(entry) => {
                tracing::info!(entry_id = %entry.id, "Added email to waitlist");
                Ok(())
            }
            Err(StoreError::UniqueViolation) => {
                tracing::info!("Email already on waitlist");
                Err(AppError::DuplicateEmail)
            }
            Err(err) => {
                tracing::error!(error = %err, "Waitlist insert failed");
                Err(err.into())
            }
        }
    }

    /// Every signup, newest first. Always a fresh fetch.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        let repo = self.repo()?;

        let mut entries = repo.list_newest_first().await.map_err(|err| {
            tracing::error!(error = %err, "Waitlist fetch failed");
            match err {
                // Cannot happen on a read; report it as the store's own failure.
                StoreError::UniqueViolation => AppError::Store(None),
                other => other.into(),
            }
        })?;

        // Stable, so rows sharing a timestamp keep the store's order.
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }
}
