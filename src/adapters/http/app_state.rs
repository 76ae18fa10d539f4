use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    infra::{RateLimiterTrait, config::AppConfig},
    use_cases::{admin::AdminUseCases, waitlist::WaitlistUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
    pub admin_use_cases: Arc<AdminUseCases>,
    /// `None` when no Redis is configured; intake is then not rate limited.
    pub rate_limiter: Option<Arc<dyn RateLimiterTrait>>,
}

impl FromRef<AppState> for Arc<WaitlistUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.waitlist_use_cases.clone()
    }
}

impl FromRef<AppState> for Arc<AdminUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.admin_use_cases.clone()
    }
}
