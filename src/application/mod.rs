pub mod app_error;
pub mod dictionaries;
pub mod export;
pub mod jwt;
pub mod language;
pub mod use_cases;
pub mod validators;
