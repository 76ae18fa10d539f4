pub mod admin;
pub mod dictionary;
pub mod waitlist;

use axum::{Router, routing::get};

use crate::adapters::http::app_state::AppState;

/// Admin and intake routers take the state to attach their middleware.
pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/waitlist", waitlist::router(app_state.clone()))
        .nest("/admin", admin::router(app_state))
        .nest("/dictionary", dictionary::router())
}

async fn health() -> &'static str {
    "ok"
}
