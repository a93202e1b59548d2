//! Guild settings domain model and its document encoding.
//!
//! A settings document is a loose JSON object. The dashboard owns a handful of its fields
//! and ignores the rest, so decoding is lenient and writes only ever touch owned fields.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::{
    model::settings::{GuildSettingsDto, UpdateGuildSettingsDto, DEFAULT_WELCOME_MESSAGE},
    server::error::store::StoreError,
};

pub const FIELD_AUTO_ROLE_IDS: &str = "auto_role_ids";
pub const FIELD_WELCOME_CHANNEL_ID: &str = "welcome_channel_id";
pub const FIELD_WELCOME_MESSAGE: &str = "welcome_message";
pub const FIELD_LAST_UPDATED: &str = "last_updated";
pub const FIELD_UPDATED_BY_DISCORD_ID: &str = "updated_by_discord_id";
pub const FIELD_UPDATED_BY_STORE_UID: &str = "updated_by_store_uid";

/// Persisted settings for one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSettings {
    pub guild_id: u64,
    pub auto_role_ids: Vec<u64>,
    pub welcome_channel_id: Option<u64>,
    pub welcome_message: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub updated_by_discord_id: Option<u64>,
    pub updated_by_store_uid: Option<String>,
}

/// Raw shape of the owned fields as found in a stored document.
#[derive(Deserialize)]
struct StoredFields {
    #[serde(default, with = "crate::model::snowflake::vec_as_string")]
    auto_role_ids: Vec<u64>,
    #[serde(default, with = "crate::model::snowflake::option_as_string")]
    welcome_channel_id: Option<u64>,
    #[serde(default)]
    welcome_message: Option<String>,
    #[serde(default)]
    last_updated: Option<Value>,
    #[serde(default)]
    updated_by_discord_id: Option<Value>,
    #[serde(default)]
    updated_by_store_uid: Option<Value>,
}

impl GuildSettings {
    /// Decodes the dashboard-owned fields of a stored document.
    ///
    /// Attribution and timestamp fields are informational, so unparsable values there are
    /// dropped instead of failing the whole load.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Document decoded
    /// - `Err(StoreError::InvalidDocument)` - Role or channel IDs are malformed
    pub fn from_document(guild_id: u64, document: &Value) -> Result<Self, StoreError> {
        let fields = StoredFields::deserialize(document).map_err(|e| {
            StoreError::InvalidDocument {
                guild_id,
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            guild_id,
            auto_role_ids: fields.auto_role_ids,
            welcome_channel_id: fields.welcome_channel_id,
            welcome_message: fields
                .welcome_message
                .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_string()),
            last_updated: fields
                .last_updated
                .as_ref()
                .and_then(Value::as_str)
                .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
                .map(|value| value.with_timezone(&Utc)),
            updated_by_discord_id: fields.updated_by_discord_id.and_then(|value| match value {
                Value::Number(number) => number.as_u64(),
                Value::String(text) => text.parse::<u64>().ok(),
                _ => None,
            }),
            updated_by_store_uid: fields
                .updated_by_store_uid
                .as_ref()
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    pub fn into_dto(self) -> GuildSettingsDto {
        GuildSettingsDto {
            auto_role_ids: self.auto_role_ids,
            welcome_channel_id: self.welcome_channel_id,
            welcome_message: self.welcome_message,
            last_updated: self.last_updated,
            updated_by_discord_id: self.updated_by_discord_id,
        }
    }
}

/// A merge write of the editable fields plus attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsUpdate {
    pub auto_role_ids: Vec<u64>,
    pub welcome_channel_id: Option<u64>,
    pub welcome_message: String,
    pub last_updated: DateTime<Utc>,
    pub updated_by_discord_id: u64,
    pub updated_by_store_uid: Option<String>,
}

impl SettingsUpdate {
    pub fn new(
        dto: UpdateGuildSettingsDto,
        updated_by_discord_id: u64,
        updated_by_store_uid: Option<String>,
    ) -> Self {
        Self {
            auto_role_ids: dto.auto_role_ids,
            welcome_channel_id: dto.welcome_channel_id,
            welcome_message: dto.welcome_message,
            last_updated: Utc::now(),
            updated_by_discord_id,
            updated_by_store_uid,
        }
    }

    /// Fields written by this update, in document encoding.
    ///
    /// `updated_by_store_uid` is only written when known so an anonymous save does not
    /// erase a previous attribution with null.
    pub fn document_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(
            FIELD_AUTO_ROLE_IDS.to_string(),
            json!(self
                .auto_role_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()),
        );
        fields.insert(
            FIELD_WELCOME_CHANNEL_ID.to_string(),
            json!(self
                .welcome_channel_id
                .map(|id| id.to_string())
                .unwrap_or_default()),
        );
        fields.insert(
            FIELD_WELCOME_MESSAGE.to_string(),
            json!(self.welcome_message),
        );
        fields.insert(
            FIELD_LAST_UPDATED.to_string(),
            json!(self.last_updated.to_rfc3339()),
        );
        fields.insert(
            FIELD_UPDATED_BY_DISCORD_ID.to_string(),
            json!(self.updated_by_discord_id.to_string()),
        );
        if let Some(uid) = &self.updated_by_store_uid {
            fields.insert(FIELD_UPDATED_BY_STORE_UID.to_string(), json!(uid));
        }
        fields
    }

    /// Overlays this update onto an existing document, keeping every other field.
    pub fn merge_into(&self, document: Value) -> Value {
        let mut merged = match document {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(self.document_fields());
        Value::Object(merged)
    }
}
