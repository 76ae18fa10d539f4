use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT_LANGUAGE, request::Parts},
};

use crate::application::language::UserLanguage;

/// Requester language taken from `Accept-Language`.
#[derive(Clone, Copy, Debug)]
pub struct RequestLanguage(pub UserLanguage);

impl<S> FromRequestParts<S> for RequestLanguage
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        Ok(RequestLanguage(UserLanguage::from_raw(raw)))
    }
}
