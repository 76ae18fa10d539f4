use once_cell::sync::Lazy;
use serde_json::Value;

use crate::application::{app_error::ErrorCode, language::UserLanguage};
use crate::domain::entities::waitlist_entry::EntryStatus;

static RAW_NB: &str = include_str!("../../dictionaries/nb.json");
static RAW_EN: &str = include_str!("../../dictionaries/en.json");

static DICT_NB_VALUE: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(RAW_NB).expect("failed to parse nb dictionary json"));
static DICT_EN_VALUE: Lazy<Value> =
    Lazy::new(|| serde_json::from_str(RAW_EN).expect("failed to parse en dictionary json"));

pub fn dictionary_json(lang: UserLanguage) -> Value {
    match lang {
        UserLanguage::Nb => DICT_NB_VALUE.clone(),
        UserLanguage::En => DICT_EN_VALUE.clone(),
    }
}

/// Looks up a dotted path. Returns the path itself when the key is missing.
pub fn t(lang: UserLanguage, path: &str) -> String {
    let dict = match lang {
        UserLanguage::Nb => &*DICT_NB_VALUE,
        UserLanguage::En => &*DICT_EN_VALUE,
    };
    let mut cursor = dict;
    for segment in path.split('.') {
        if let Some(v) = cursor.get(segment) {
            cursor = v;
        } else {
            return path.to_string();
        }
    }
    cursor.as_str().unwrap_or(path).to_string()
}

pub fn error_message(lang: UserLanguage, code: ErrorCode) -> String {
    t(lang, &format!("errors.{}", code.as_str()))
}

pub fn status_label(lang: UserLanguage, status: &EntryStatus) -> String {
    match status {
        EntryStatus::Pending => t(lang, "status.pending"),
        EntryStatus::Other(raw) => raw.clone(),
    }
}
