//! Waitlist store backed by a hosted PostgREST-style table API.
//!
//! Requests carry the access key both as `apikey` and as a bearer token.
//! Error bodies look like `{"code": "23505", "message": "...", "details": ..., "hint": ...}`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{
    domain::entities::waitlist_entry::{EntryStatus, WaitlistEntry},
    use_cases::waitlist::{StoreError, WaitlistRepo},
};

const TABLE_PATH: &str = "rest/v1/waitlist";

#[derive(Clone)]
pub struct RestWaitlistStore {
    client: Client,
    table_url: Url,
    api_key: SecretString,
}

impl RestWaitlistStore {
    pub fn new(client: Client, base_url: &Url, api_key: SecretString) -> Result<Self, url::ParseError> {
        // `Url::join` replaces the last segment unless the base ends with a slash.
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let table_url = base.join(TABLE_PATH)?;
        Ok(Self {
            client,
            table_url,
            api_key,
        })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let key = self.api_key.expose_secret();
        request.header("apikey", key).bearer_auth(key)
    }
}

#[derive(Serialize)]
struct NewRow<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct RestRow {
    id: Uuid,
    email: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    status: Option<String>,
}

impl From<RestRow> for WaitlistEntry {
    fn from(row: RestRow) -> Self {
        WaitlistEntry {
            id: row.id,
            email: row.email,
            created_at: row.created_at,
            status: row
                .status
                .as_deref()
                .map(EntryStatus::from_raw)
                .unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
struct RestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl WaitlistRepo for RestWaitlistStore {
    async fn insert(&self, email: &str) -> Result<WaitlistEntry, StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url.clone()))
            .header("Prefer", "return=representation")
            .json(&[NewRow { email }])
            .send()
            .await
            .map_err(|e| StoreError::transport(format!("Store request failed: {e}")))?;

        let rows = read_rows(response).await?;
        rows.into_iter()
            .next()
            .map(WaitlistEntry::from)
            .ok_or_else(|| StoreError::transport("Store returned no row for the insert"))
    }

    async fn list_newest_first(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        let response = self
            .authorized(self.client.get(self.table_url.clone()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(|e| StoreError::transport(format!("Store request failed: {e}")))?;

        let rows = read_rows(response).await?;
        Ok(rows.into_iter().map(WaitlistEntry::from).collect())
    }
}

async fn read_rows(response: Response) -> Result<Vec<RestRow>, StoreError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| StoreError::transport(format!("Failed to read store response: {e}")))?;

    if !status.is_success() {
        return Err(classify_error(status, &body));
    }

    serde_json::from_str(&body)
        .map_err(|e| StoreError::transport(format!("Malformed store response: {e}")))
}

fn classify_error(status: StatusCode, body: &str) -> StoreError {
    match serde_json::from_str::<RestErrorBody>(body) {
        Ok(err) => StoreError::from_code(err.code.as_deref(), err.message),
        // PostgREST answers unique violations with 409 even when the body is unreadable.
        Err(_) if status == StatusCode::CONFLICT => StoreError::UniqueViolation,
        Err(_) => {
            tracing::warn!(%status, "Store returned an unreadable error body");
            StoreError::transport(format!("Store responded with HTTP {status}"))
        }
    }
}
