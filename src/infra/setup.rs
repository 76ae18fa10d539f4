use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{http::app_state::AppState, rest_store::RestWaitlistStore},
    infra::{
        InfraError, RateLimiterTrait,
        config::{AppConfig, StoreConfig},
        http_client::try_build_client,
        postgres_persistence,
        rate_limit::RedisRateLimiter,
    },
    use_cases::{
        admin::AdminUseCases,
        waitlist::{WaitlistRepo, WaitlistUseCases},
    },
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env()?;

    let waitlist_use_cases = init_waitlist_use_cases(&config.store).await?;

    let credentials = config.admin_credentials()?;
    if credentials.is_none() {
        tracing::warn!("ADMIN_PASSWORD not set, admin endpoints are disabled");
    }
    let admin_use_cases = AdminUseCases::new(credentials, config.admin_session_ttl);

    let rate_limiter = match &config.redis_url {
        Some(redis_url) => {
            let limiter = RedisRateLimiter::new(
                redis_url,
                config.rate_limit_window_secs,
                config.rate_limit_per_ip,
            )
            .await?;
            Some(Arc::new(limiter) as Arc<dyn RateLimiterTrait>)
        }
        None => {
            tracing::info!("REDIS_URL not set, waitlist intake is not rate limited");
            None
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        admin_use_cases: Arc::new(admin_use_cases),
        rate_limiter,
    })
}

async fn init_waitlist_use_cases(store: &StoreConfig) -> anyhow::Result<WaitlistUseCases> {
    let repo: Arc<dyn WaitlistRepo> = match store {
        StoreConfig::Postgres { database_url } => Arc::new(postgres_persistence(database_url).await?),
        StoreConfig::Rest { url, api_key } => {
            let client = try_build_client().map_err(InfraError::HttpClient)?;
            let store = RestWaitlistStore::new(client, url, api_key.clone()).map_err(|_| {
                InfraError::ConfigInvalid {
                    var: "WAITLIST_STORE_URL",
                }
            })?;
            tracing::info!(host = url.host_str().unwrap_or_default(), "Using hosted waitlist store");
            Arc::new(store)
        }
        StoreConfig::Unconfigured => {
            tracing::warn!(
                "No waitlist store configured (DATABASE_URL or WAITLIST_STORE_URL + WAITLIST_STORE_KEY)"
            );
            return Ok(WaitlistUseCases::unconfigured());
        }
    };

    Ok(WaitlistUseCases::new(repo))
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "utforsk_waitlist=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs), skipped if the file cannot be created
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
