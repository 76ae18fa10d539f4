//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` backed by `InMemoryWaitlistRepo`
//! and, optionally, an admin gate and an in-memory rate limiter.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    domain::entities::waitlist_entry::WaitlistEntry,
    infra::{
        RateLimiterTrait,
        config::{AppConfig, StoreConfig},
    },
    test_utils::{InMemoryRateLimiter, InMemoryWaitlistRepo},
    use_cases::{
        admin::{AdminCredentials, AdminUseCases},
        waitlist::{WaitlistRepo, WaitlistUseCases},
    },
};

pub const TEST_SESSION_SECRET: &str = "test_admin_session_secret";

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo) = TestAppStateBuilder::new()
///     .with_entry(create_test_entry(|e| e.email = "a@b.com".to_string()))
///     .with_admin_password("secret")
///     .build_with_repo();
/// ```
pub struct TestAppStateBuilder {
    entries: Vec<WaitlistEntry>,
    store_configured: bool,
    admin_password: Option<String>,
    rate_limiter: Option<Arc<dyn RateLimiterTrait>>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            store_configured: true,
            admin_password: None,
            rate_limiter: None,
        }
    }

    /// Seed the in-memory store with an entry.
    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_entries(mut self, entries: Vec<WaitlistEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Leave the waitlist store unconfigured; the repo is still returned
    /// by `build_with_repo` so tests can assert it is never called.
    pub fn unconfigured(mut self) -> Self {
        self.store_configured = false;
        self
    }

    /// Enable the admin gate with the given password.
    pub fn with_admin_password(mut self, password: &str) -> Self {
        self.admin_password = Some(password.to_string());
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: InMemoryRateLimiter) -> Self {
        self.rate_limiter = Some(Arc::new(rate_limiter));
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_repo().0
    }

    /// Build the AppState and return the in-memory repo for assertions.
    pub fn build_with_repo(self) -> (AppState, Arc<InMemoryWaitlistRepo>) {
        let repo = Arc::new(InMemoryWaitlistRepo::with_entries(self.entries));

        let waitlist_use_cases = if self.store_configured {
            WaitlistUseCases::new(repo.clone() as Arc<dyn WaitlistRepo>)
        } else {
            WaitlistUseCases::unconfigured()
        };

        let admin_password = self
            .admin_password
            .map(|p| SecretString::new(p.into()));
        let admin_session_secret = admin_password
            .as_ref()
            .map(|_| SecretString::new(TEST_SESSION_SECRET.into()));

        let config = AppConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            cors_origin: HeaderValue::from_static("http://localhost:5173"),
            store: StoreConfig::Unconfigured,
            admin_password: admin_password.clone(),
            admin_session_secret: admin_session_secret.clone(),
            admin_session_ttl: Duration::minutes(30),
            redis_url: None,
            rate_limit_window_secs: 60,
            rate_limit_per_ip: 10,
            trust_proxy: false,
            cookie_secure: false,
        };

        let credentials = admin_password
            .zip(admin_session_secret)
            .map(|(password, session_secret)| AdminCredentials {
                password,
                session_secret,
            });
        let admin_use_cases = AdminUseCases::new(credentials, config.admin_session_ttl);

        let app_state = AppState {
            config: Arc::new(config),
            waitlist_use_cases: Arc::new(waitlist_use_cases),
            admin_use_cases: Arc::new(admin_use_cases),
            rate_limiter: self.rate_limiter,
        };

        (app_state, repo)
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
