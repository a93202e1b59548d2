//! Guild settings document factory.
//!
//! Seeds the `guild_settings` table with a JSON document shaped like the ones the
//! dashboard writes, with optional extra fields to exercise merge-write preservation.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::{json, Map, Value};

/// Factory for creating test guild settings documents.
pub struct GuildSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    auto_role_ids: Vec<String>,
    welcome_channel_id: String,
    welcome_message: String,
    extra: Map<String, Value>,
}

impl<'a> GuildSettingsFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented
    /// - auto_role_ids: empty
    /// - welcome_channel_id: empty
    /// - welcome_message: `"Welcome {user}!"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            auto_role_ids: Vec::new(),
            welcome_channel_id: String::new(),
            welcome_message: "Welcome {user}!".to_string(),
            extra: Map::new(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn auto_role_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auto_role_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn welcome_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.welcome_channel_id = channel_id.into();
        self
    }

    pub fn welcome_message(mut self, message: impl Into<String>) -> Self {
        self.welcome_message = message.into();
        self
    }

    /// Adds a field the dashboard itself never writes.
    pub fn extra_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Builds and inserts the settings document.
    ///
    /// # Returns
    /// - `Ok(entity::guild_settings::Model)` - Created document row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild_settings::Model, DbErr> {
        let now = Utc::now();

        let mut document = self.extra;
        document.insert("auto_role_ids".to_string(), json!(self.auto_role_ids));
        document.insert(
            "welcome_channel_id".to_string(),
            json!(self.welcome_channel_id),
        );
        document.insert("welcome_message".to_string(), json!(self.welcome_message));
        document.insert("last_updated".to_string(), json!(now.to_rfc3339()));

        entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            document: ActiveValue::Set(Value::Object(document)),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a settings document with default values.
pub async fn create_guild_settings(
    db: &DatabaseConnection,
) -> Result<entity::guild_settings::Model, DbErr> {
    GuildSettingsFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_document_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_settings_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let row = create_guild_settings(db).await?;

        assert!(!row.guild_id.is_empty());
        assert_eq!(row.document["auto_role_ids"], json!([]));
        assert_eq!(row.document["welcome_message"], json!("Welcome {user}!"));

        Ok(())
    }

    #[tokio::test]
    async fn keeps_extra_fields() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_settings_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let row = GuildSettingsFactory::new(db)
            .guild_id("42")
            .extra_field("premium", json!(true))
            .build()
            .await?;

        assert_eq!(row.guild_id, "42");
        assert_eq!(row.document["premium"], json!(true));

        Ok(())
    }
}
