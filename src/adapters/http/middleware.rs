use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    adapters::http::{app_state::AppState, lang::RequestLanguage},
    app_error::{AppError, LocalizedError},
};

pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

pub async fn rate_limit_middleware(
    State(app_state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    request: Request,
    next: Next,
) -> Result<Response, LocalizedError> {
    let Some(rate_limiter) = app_state.rate_limiter.as_ref() else {
        return Ok(next.run(request).await);
    };

    let connect_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    // Only trust forwarded headers if explicitly configured (when behind a reverse proxy)
    let ip = if app_state.config.trust_proxy {
        forwarded_ip(&request).or(connect_ip.clone())
    } else {
        connect_ip.clone()
    }
    .unwrap_or_else(|| "unknown".to_string());

    tracing::debug!(
        trust_proxy = app_state.config.trust_proxy,
        connect_ip = ?connect_ip,
        forwarded_ip = ?forwarded_ip(&request),
        using_ip = %ip,
        "Rate limiting request"
    );

    rate_limiter
        .check(&ip)
        .await
        .map_err(|e| e.localized(lang))?;

    Ok(next.run(request).await)
}

/// Rejects requests without a valid admin session. Both the cookie and the
/// bearer token are tried; either one verifying is enough.
pub async fn require_admin_session(
    State(app_state): State<AppState>,
    RequestLanguage(lang): RequestLanguage,
    cookies: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, LocalizedError> {
    let candidates = session_tokens(&cookies, request.headers());
    if candidates.is_empty() {
        return Err(AppError::InvalidCredentials.localized(lang));
    }

    let mut last_error = AppError::InvalidCredentials;
    for token in candidates {
        match app_state.admin_use_cases.verify_session(&token) {
            Ok(()) => return Ok(next.run(request).await),
            Err(e) => last_error = e,
        }
    }

    Err(last_error.localized(lang))
}

/// Cookie first, then `Authorization: Bearer`.
fn session_tokens(cookies: &CookieJar, headers: &HeaderMap) -> Vec<String> {
    let cookie = cookies
        .get(ADMIN_SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty());
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    cookie.into_iter().chain(bearer).collect()
}

fn forwarded_ip(req: &Request) -> Option<String> {
    // Extract IP from X-Forwarded-For or X-Real-IP headers
    if let Some(forwarded) = req.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let trimmed = first.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    if let Some(real) = req.headers().get("x-real-ip")
        && let Ok(val) = real.to_str()
        && !val.trim().is_empty()
    {
        return Some(val.trim().to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;

    #[test]
    fn forwarded_for_takes_first_hop() {
        let req = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(forwarded_ip(&req).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn real_ip_is_fallback() {
        let req = Request::builder()
            .header("x-real-ip", " 198.51.100.2 ")
            .body(Body::empty())
            .unwrap();
        assert_eq!(forwarded_ip(&req).as_deref(), Some("198.51.100.2"));
    }

    #[test]
    fn session_tokens_lists_cookie_then_bearer() {
        let jar = CookieJar::new().add(Cookie::new(ADMIN_SESSION_COOKIE, "from-cookie"));
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));

        assert_eq!(session_tokens(&jar, &headers), vec!["from-cookie", "from-header"]);
        assert_eq!(
            session_tokens(&CookieJar::new(), &headers),
            vec!["from-header"]
        );
    }

    #[test]
    fn session_tokens_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(session_tokens(&CookieJar::new(), &headers).is_empty());
        let empty_cookie = CookieJar::new().add(Cookie::new(ADMIN_SESSION_COOKIE, ""));
        assert!(session_tokens(&empty_cookie, &HeaderMap::new()).is_empty());
    }
}
