use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    domain::entities::waitlist_entry::{EntryStatus, WaitlistEntry},
    use_cases::waitlist::{StoreError, WaitlistRepo},
};

// Waitlist row as stored in the db.
#[derive(sqlx::FromRow, Debug)]
pub struct WaitlistDb {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

impl From<WaitlistDb> for WaitlistEntry {
    fn from(row: WaitlistDb) -> Self {
        WaitlistEntry {
            id: row.id,
            email: row.email,
            created_at: row.created_at,
            status: EntryStatus::from_raw(&row.status),
        }
    }
}

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn insert(&self, email: &str) -> Result<WaitlistEntry, StoreError> {
        let row = sqlx::query_as::<_, WaitlistDb>(
            r#"
                INSERT INTO waitlist (email)
                VALUES ($1)
                RETURNING id, email, created_at, status
            "#,
        )
        .bind(email)
        .fetch_one(self.pool())
        .await?;
        Ok(row.into())
    }

    async fn list_newest_first(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        let rows = sqlx::query_as::<_, WaitlistDb>(
            "SELECT id, email, created_at, status FROM waitlist ORDER BY created_at DESC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(WaitlistEntry::from).collect())
    }
}
