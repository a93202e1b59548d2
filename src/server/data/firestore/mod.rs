//! Minimal Firestore REST client for the guild settings collection.
//!
//! Documents live at `artifacts/{app_id}/public/data/guild_settings/{guild_id}`. Writes use
//! `PATCH` with an explicit `updateMask`, which creates the document if missing and leaves
//! every unlisted field untouched.

pub mod value;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::server::error::store::StoreError;

pub const FIRESTORE_API_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Clone)]
pub struct FirestoreClient {
    http: Client,
    api_url: String,
    project_id: String,
    api_key: String,
    app_id: String,
}

impl FirestoreClient {
    pub fn new(http: Client, project_id: String, api_key: String, app_id: String) -> Self {
        Self {
            http,
            api_url: FIRESTORE_API_URL.to_string(),
            project_id,
            api_key,
            app_id,
        }
    }

    /// Points the client at another Firestore REST endpoint, such as the local emulator.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn document_url(&self, guild_id: u64) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/artifacts/{}/public/data/guild_settings/{}",
            self.api_url, self.project_id, self.app_id, guild_id
        )
    }

    /// Fetches a guild's settings document as plain JSON.
    ///
    /// # Returns
    /// - `Ok(Some(Value))` - Decoded document fields
    /// - `Ok(None)` - Document does not exist
    /// - `Err(StoreError::Status)` - Firestore rejected the read (e.g. security rules)
    /// - `Err(StoreError::Request)` - Network failure
    pub async fn get(&self, guild_id: u64, id_token: Option<&str>) -> Result<Option<Value>, StoreError> {
        let mut request = self
            .http
            .get(self.document_url(guild_id))
            .query(&[("key", self.api_key.as_str())]);
        if let Some(token) = id_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let document: Document = response.json().await?;
        Ok(Some(Value::Object(value::decode_fields(&document.fields))))
    }

    /// Writes the given fields into a guild's document, creating it when absent.
    ///
    /// Returns the full document as stored after the write.
    pub async fn merge(
        &self,
        guild_id: u64,
        fields: Map<String, Value>,
        id_token: Option<&str>,
    ) -> Result<Value, StoreError> {
        let mut query: Vec<(&str, &str)> = fields
            .keys()
            .map(|field| ("updateMask.fieldPaths", field.as_str()))
            .collect();
        query.push(("key", self.api_key.as_str()));

        let mut request = self
            .http
            .patch(self.document_url(guild_id))
            .query(&query)
            .json(&json!({ "fields": value::encode_fields(&fields) }));
        if let Some(token) = id_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let document: Document = response.json().await?;
        Ok(Value::Object(value::decode_fields(&document.fields)))
    }
}
