use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha256;
use time::Duration;
use tracing::instrument;

use crate::app_error::{AppError, AppResult};
use crate::application::jwt;
use crate::domain::entities::waitlist_entry::WaitlistEntry;

type HmacSha256 = Hmac<Sha256>;

/// Password and signing secret for the admin gate. Both live server-side only.
#[derive(Clone)]
pub struct AdminCredentials {
    pub password: SecretString,
    pub session_secret: SecretString,
}

#[derive(Clone)]
pub struct AdminUseCases {
    credentials: Option<AdminCredentials>,
    session_ttl: Duration,
}

impl AdminUseCases {
    pub fn new(credentials: Option<AdminCredentials>, session_ttl: Duration) -> Self {
        Self {
            credentials,
            session_ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    fn credentials(&self) -> AppResult<&AdminCredentials> {
        self.credentials.as_ref().ok_or(AppError::AdminDisabled)
    }

    /// Checks the password and issues a session token.
    #[instrument(skip_all)]
    pub async fn login(&self, password: &str) -> AppResult<String> {
        let credentials = self.credentials()?;

        if !password_matches(credentials, password)? {
            tracing::warn!("Admin login with wrong password");
            return Err(AppError::WrongPassword);
        }

        tracing::info!("Admin session issued");
        jwt::issue_admin(&credentials.session_secret, self.session_ttl)
    }

    pub fn verify_session(&self, token: &str) -> AppResult<()> {
        let credentials = self.credentials()?;
        jwt::verify_admin(token, &credentials.session_secret)?;
        Ok(())
    }
}

/// Compares HMAC tags of both values; `verify_slice` is constant time.
fn password_matches(credentials: &AdminCredentials, candidate: &str) -> AppResult<bool> {
    let key = credentials.session_secret.expose_secret().as_bytes();

    let mut expected = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    expected.update(credentials.password.expose_secret().as_bytes());
    let expected_tag = expected.finalize().into_bytes();

    let mut given =
        HmacSha256::new_from_slice(key).map_err(|e| AppError::Internal(e.to_string()))?;
    given.update(candidate.as_bytes());

    Ok(given.verify_slice(&expected_tag).is_ok())
}

// ============================================================================
// Dashboard Statistics
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaitlistStats {
    pub total: usize,
    pub today: usize,
    pub last_7_days: usize,
}

/// `today` uses the UTC calendar day of `now`; `last_7_days` is a rolling window.
pub fn compute_stats(entries: &[WaitlistEntry], now: DateTime<Utc>) -> WaitlistStats {
    let today = now.date_naive();
    let week_ago = now - chrono::Duration::days(7);

    WaitlistStats {
        total: entries.len(),
        today: entries
            .iter()
            .filter(|e| e.created_at.date_naive() == today)
            .count(),
        last_7_days: entries.iter().filter(|e| e.created_at >= week_ago).count(),
    }
}
