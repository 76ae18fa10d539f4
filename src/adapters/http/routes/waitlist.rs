use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{app_state::AppState, lang::RequestLanguage, middleware::rate_limit_middleware},
    app_error::{AppError, LocalizedError},
    application::{dictionaries::t, validators::looks_like_email},
};

pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(join_waitlist))
        .route_layer(middleware::from_fn_with_state(
            app_state,
            rate_limit_middleware,
        ))
}

#[derive(Deserialize)]
struct JoinWaitlistPayload {
    email: String,
}

#[derive(Serialize)]
struct JoinWaitlistResponse {
    success: bool,
}

/// POST /api/waitlist
async fn join_waitlist(
    State(app_state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    payload: Result<Json<JoinWaitlistPayload>, JsonRejection>,
) -> Result<impl IntoResponse, LocalizedError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected waitlist payload");
        AppError::InvalidInput(t(lang, "errors.INVALID_EMAIL")).localized(lang)
    })?;

    let email = payload.email.trim();
    if !looks_like_email(email) {
        return Err(AppError::InvalidInput(t(lang, "errors.INVALID_EMAIL")).localized(lang));
    }

    app_state
        .waitlist_use_cases
        .submit(email)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok((
        StatusCode::CREATED,
        Json(JoinWaitlistResponse { success: true }),
    ))
}
