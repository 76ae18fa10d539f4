use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::{
        app_state::AppState,
        lang::RequestLanguage,
        middleware::{ADMIN_SESSION_COOKIE, require_admin_session},
    },
    app_error::{AppError, LocalizedError},
    application::{
        dictionaries::{status_label, t},
        export::{ExportFile, export_file},
    },
    domain::entities::waitlist_entry::WaitlistEntry,
    use_cases::admin::{WaitlistStats, compute_stats},
};

const SESSION_COOKIE_PATH: &str = "/api/admin";

pub fn router(app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/waitlist", get(list_waitlist))
        .route("/waitlist/export", get(export_waitlist))
        .route_layer(middleware::from_fn_with_state(
            app_state,
            require_admin_session,
        ));

    Router::new()
        .route("/session", post(login).delete(logout))
        .merge(protected)
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
struct LoginPayload {
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
    expires_in_secs: i64,
}

#[derive(Serialize)]
struct EntryResponse {
    id: Uuid,
    email: String,
    created_at: DateTime<Utc>,
    status: String,
    status_label: String,
}

#[derive(Serialize)]
struct WaitlistResponse {
    entries: Vec<EntryResponse>,
    stats: WaitlistStats,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/admin/session
/// Checks the admin password and sets the session cookie.
async fn login(
    State(app_state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    jar: CookieJar,
    payload: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<impl IntoResponse, LocalizedError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected admin login payload");
        AppError::InvalidInput(t(lang, "errors.INVALID_INPUT")).localized(lang)
    })?;

    let token = app_state
        .admin_use_cases
        .login(&payload.password)
        .await
        .map_err(|e| e.localized(lang))?;

    let ttl = app_state.admin_use_cases.session_ttl();
    let cookie = Cookie::build((ADMIN_SESSION_COOKIE, token.clone()))
        .http_only(true)
        .secure(app_state.config.cookie_secure)
        .same_site(SameSite::Strict)
        .path(SESSION_COOKIE_PATH)
        .max_age(ttl)
        .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            token,
            expires_in_secs: ttl.whole_seconds(),
        }),
    ))
}

/// DELETE /api/admin/session
async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(ADMIN_SESSION_COOKIE).path(SESSION_COOKIE_PATH));
    (StatusCode::NO_CONTENT, jar)
}

/// GET /api/admin/waitlist
async fn list_waitlist(
    State(app_state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
) -> Result<impl IntoResponse, LocalizedError> {
    let entries = app_state
        .waitlist_use_cases
        .list_all()
        .await
        .map_err(|e| e.localized(lang))?;

    let stats = compute_stats(&entries, Utc::now());
    let entries = entries
        .into_iter()
        .map(|entry| {
            let label = status_label(lang, &entry.status);
            to_response(entry, label)
        })
        .collect();

    Ok(Json(WaitlistResponse { entries, stats }))
}

/// GET /api/admin/waitlist/export
/// Downloads every signup, newest first, as `utforsk-venteliste-YYYY-MM-DD.csv`.
async fn export_waitlist(
    State(app_state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
) -> Result<ExportFile, LocalizedError> {
    let entries = app_state
        .waitlist_use_cases
        .list_all()
        .await
        .map_err(|e| e.localized(lang))?;

    let file = export_file(&entries, Utc::now().date_naive());
    tracing::info!(rows = entries.len(), file_name = %file.file_name, "Exported waitlist");
    Ok(file)
}

fn to_response(entry: WaitlistEntry, status_label: String) -> EntryResponse {
    EntryResponse {
        id: entry.id,
        email: entry.email,
        created_at: entry.created_at,
        status: entry.status.as_str().to_string(),
        status_label,
    }
}
