use crate::app_error::{AppError, ErrorCode, LocalizedError};
use crate::application::{dictionaries::error_message, language::UserLanguage};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.localized(UserLanguage::default()).into_response()
    }
}

impl IntoResponse for LocalizedError {
    fn into_response(self) -> Response {
        let LocalizedError { lang, error } = self;
        let status = status_for(&error);

        // Log the error before it gets converted into a status response.
        if status.is_server_error() {
            tracing::error!(error = ?error, "Request failed");
        } else {
            tracing::warn!(error = ?error, "Request rejected");
        }

        let message = message_for(&error, lang);
        error_resp(status, error.code(), message)
    }
}

fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::StoreNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        AppError::DuplicateEmail => StatusCode::CONFLICT,
        AppError::Store(_) | AppError::Unexpected(_) => StatusCode::BAD_GATEWAY,
        AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        AppError::WrongPassword | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AppError::AdminDisabled => StatusCode::FORBIDDEN,
        AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Store messages and pre-localized input errors pass through; everything
/// else uses the dictionary copy for its code.
fn message_for(error: &AppError, lang: UserLanguage) -> String {
    match error {
        AppError::Store(Some(msg)) | AppError::Unexpected(Some(msg)) => msg.clone(),
        AppError::InvalidInput(msg) if !msg.is_empty() => msg.clone(),
        other => error_message(lang, other.code()),
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: String) -> Response {
    let body = serde_json::json!({ "code": code.as_str(), "message": message });
    (status, Json(body)).into_response()
}
