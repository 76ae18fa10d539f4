use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EntryStatus {
    #[default]
    Pending,
    /// Any other value the store holds. Kept verbatim.
    Other(String),
}

impl EntryStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EntryStatus::Pending => "pending",
            EntryStatus::Other(raw) => raw,
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "pending" => EntryStatus::Pending,
            other => EntryStatus::Other(other.to_string()),
        }
    }
}

impl Serialize for EntryStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One signup. `id`, `created_at` and `status` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub status: EntryStatus,
}
