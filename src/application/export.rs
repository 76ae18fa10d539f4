//! CSV export of waitlist entries.
//!
//! Generation is pure: [`to_csv`] and [`export_file`] only shape text. Handing
//! the file to the user (an HTTP attachment) happens in the adapter layer.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::waitlist_entry::WaitlistEntry;

pub const CSV_HEADER: [&str; 3] = ["E-post", "Dato", "Status"];
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const FILE_PREFIX: &str = "utforsk-venteliste";

/// A generated export, ready to be delivered as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Header line plus one line per entry, in the order given.
///
/// Lines are separated by `\n` without a trailing newline.
pub fn to_csv(entries: &[WaitlistEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for entry in entries {
        let date = format_date(&entry.created_at);
        let row = [
            escape_field(&entry.email),
            escape_field(&date),
            escape_field(entry.status.as_str()),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("{FILE_PREFIX}-{}.csv", today.format("%Y-%m-%d"))
}

pub fn export_file(entries: &[WaitlistEntry], today: NaiveDate) -> ExportFile {
    ExportFile {
        file_name: export_file_name(today),
        content_type: CSV_CONTENT_TYPE,
        body: to_csv(entries),
    }
}

/// Norwegian short date, e.g. `1.6.2025`. Rendered in UTC.
fn format_date(created_at: &DateTime<Utc>) -> String {
    created_at.format("%-d.%-m.%Y").to_string()
}

/// RFC 4180 quoting: wrap in quotes when the field contains a separator,
/// quote or line break, doubling inner quotes.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
