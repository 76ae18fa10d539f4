use thiserror::Error;

use crate::application::language::UserLanguage;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Waitlist store is not configured")]
    StoreNotConfigured,

    #[error("Email is already on the waitlist")]
    DuplicateEmail,

    /// The store rejected the operation. Carries the store's message when it sent one.
    #[error("Store error: {0:?}")]
    Store(Option<String>),

    /// Transport or decoding failure talking to the store.
    #[error("Unexpected error: {0:?}")]
    Unexpected(Option<String>),

    #[error("Too many requests. Please slow down.")]
    RateLimited,

    #[error("Wrong admin password")]
    WrongPassword,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Admin access is disabled")]
    AdminDisabled,

    /// Message is already localized by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    StoreNotConfigured,
    DuplicateEmail,
    StoreError,
    UnexpectedError,
    RateLimited,
    WrongPassword,
    InvalidCredentials,
    AdminDisabled,
    InvalidInput,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::StoreNotConfigured => "STORE_NOT_CONFIGURED",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::StoreError => "STORE_ERROR",
            ErrorCode::UnexpectedError => "UNEXPECTED_ERROR",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::WrongPassword => "WRONG_PASSWORD",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::AdminDisabled => "ADMIN_DISABLED",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::StoreNotConfigured => ErrorCode::StoreNotConfigured,
            AppError::DuplicateEmail => ErrorCode::DuplicateEmail,
            AppError::Store(_) => ErrorCode::StoreError,
            AppError::Unexpected(_) => ErrorCode::UnexpectedError,
            AppError::RateLimited => ErrorCode::RateLimited,
            AppError::WrongPassword => ErrorCode::WrongPassword,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::AdminDisabled => ErrorCode::AdminDisabled,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Attach the language the error message should be rendered in.
    pub fn localized(self, lang: UserLanguage) -> LocalizedError {
        LocalizedError { lang, error: self }
    }
}

/// An [`AppError`] paired with the requester's language.
#[derive(Debug)]
pub struct LocalizedError {
    pub lang: UserLanguage,
    pub error: AppError,
}

impl From<AppError> for LocalizedError {
    fn from(error: AppError) -> Self {
        error.localized(UserLanguage::default())
    }
}

pub type AppResult<T> = Result<T, AppError>;
