use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use secrecy::SecretString;
use time::Duration;
use url::Url;

use crate::{infra::InfraError, use_cases::admin::AdminCredentials};

/// Where waitlist signups are persisted.
pub enum StoreConfig {
    /// Direct Postgres connection (`DATABASE_URL`).
    Postgres { database_url: String },
    /// Hosted table API (`WAITLIST_STORE_URL` + `WAITLIST_STORE_KEY`).
    Rest { url: Url, api_key: SecretString },
    /// Nothing configured; intake and admin reads fail with STORE_NOT_CONFIGURED.
    Unconfigured,
}

impl StoreConfig {
    /// `DATABASE_URL` wins over the hosted store. The hosted store needs both values.
    pub fn from_parts(
        database_url: Option<String>,
        store_url: Option<String>,
        store_key: Option<String>,
    ) -> Result<Self, InfraError> {
        if let Some(database_url) = non_empty(database_url) {
            return Ok(StoreConfig::Postgres { database_url });
        }

        match (non_empty(store_url), non_empty(store_key)) {
            (Some(url), Some(key)) => {
                let url = Url::parse(&url).map_err(|_| InfraError::ConfigInvalid {
                    var: "WAITLIST_STORE_URL",
                })?;
                Ok(StoreConfig::Rest {
                    url,
                    api_key: SecretString::new(key.into()),
                })
            }
            _ => Ok(StoreConfig::Unconfigured),
        }
    }
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub store: StoreConfig,
    pub admin_password: Option<SecretString>,
    /// HMAC key for admin session tokens. Required whenever a password is set.
    pub admin_session_secret: Option<SecretString>,
    pub admin_session_ttl: Duration,
    /// Intake rate limiting is off without Redis.
    pub redis_url: Option<String>,
    pub rate_limit_window_secs: u64,
    pub rate_limit_per_ip: u64,
    /// Whether to trust X-Forwarded-For headers. Set to true when behind a reverse proxy (Caddy, nginx).
    /// SECURITY: Only enable this when the API is not directly exposed to the internet.
    pub trust_proxy: bool,
    /// Marks the admin session cookie `Secure`. Enable when served over HTTPS.
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:5173"))
                .parse()
                .map_err(|_| InfraError::ConfigInvalid { var: "CORS_ORIGIN" })?;

        let store = StoreConfig::from_parts(
            optional_env("DATABASE_URL"),
            optional_env("WAITLIST_STORE_URL"),
            optional_env("WAITLIST_STORE_KEY"),
        )?;

        let admin_password = optional_env("ADMIN_PASSWORD").map(|p| SecretString::new(p.into()));
        let admin_session_secret =
            optional_env("ADMIN_SESSION_SECRET").map(|s| SecretString::new(s.into()));
        let admin_session_ttl_minutes: i64 = get_env_default("ADMIN_SESSION_TTL_MINUTES", 480);

        let redis_url = optional_env("REDIS_URL");
        let rate_limit_window_secs: u64 = get_env_default("RATE_LIMIT_WINDOW_SECS", 60);
        let rate_limit_per_ip: u64 = get_env_default("RATE_LIMIT_PER_IP", 10);
        // Default to false for security - must explicitly enable when behind a trusted proxy
        let trust_proxy: bool = get_env_default("TRUST_PROXY", false);
        let cookie_secure: bool = get_env_default("COOKIE_SECURE", false);

        Ok(Self {
            bind_addr,
            cors_origin,
            store,
            admin_password,
            admin_session_secret,
            admin_session_ttl: Duration::minutes(admin_session_ttl_minutes),
            redis_url,
            rate_limit_window_secs,
            rate_limit_per_ip,
            trust_proxy,
            cookie_secure,
        })
    }

    /// `None` leaves the admin gate disabled. A password without a session secret is a
    /// startup error rather than a silently disabled gate.
    pub fn admin_credentials(&self) -> Result<Option<AdminCredentials>, InfraError> {
        match (&self.admin_password, &self.admin_session_secret) {
            (Some(password), Some(session_secret)) => Ok(Some(AdminCredentials {
                password: password.clone(),
                session_secret: session_secret.clone(),
            })),
            (Some(_), None) => Err(InfraError::ConfigMissing {
                var: "ADMIN_SESSION_SECRET",
            }),
            (None, _) => Ok(None),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    non_empty(std::env::var(key).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
