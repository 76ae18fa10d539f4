use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::app_error::{AppError, AppResult};

pub const ADMIN_SUBJECT: &str = "admin";

// ============================================================================
// Admin Session Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn issue_admin(secret: &SecretString, ttl: Duration) -> AppResult<String> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let exp = now + ttl.whole_seconds();
    let claims = AdminClaims {
        sub: ADMIN_SUBJECT.to_string(),
        iat: now,
        exp,
    };
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

/// Any decoding failure (bad signature, expired, malformed) is reported as
/// `InvalidCredentials`.
pub fn verify_admin(token: &str, secret: &SecretString) -> AppResult<AdminClaims> {
    let validation = Validation::new(Algorithm::HS256);
    let claims = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Admin session token rejected");
        AppError::InvalidCredentials
    })?;

    if claims.sub != ADMIN_SUBJECT {
        return Err(AppError::InvalidCredentials);
    }
    Ok(claims)
}
