use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait, TransactionTrait};
use serde_json::Value;

use crate::server::{
    error::store::StoreError,
    model::settings::{GuildSettings, SettingsUpdate},
};

/// Settings documents kept in the application's own SQLite database.
pub struct GuildSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads the settings document for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(GuildSettings))` - Document exists and decodes
    /// - `Ok(None)` - No document has been written for this guild yet
    /// - `Err(StoreError::InvalidDocument)` - Stored document has malformed IDs
    /// - `Err(StoreError::Database)` - Database error during query
    pub async fn find(&self, guild_id: u64) -> Result<Option<GuildSettings>, StoreError> {
        let Some(row) = entity::prelude::GuildSettings::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(GuildSettings::from_document(guild_id, &row.document)?))
    }

    /// Merge-writes the editable fields into a guild's document.
    ///
    /// Reads the current document, overlays the update and upserts the result inside one
    /// transaction. Fields not named by the update are carried over unchanged.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - The document as stored after the write
    /// - `Err(StoreError::Database)` - Database error during read or write
    pub async fn merge(
        &self,
        guild_id: u64,
        update: &SettingsUpdate,
    ) -> Result<GuildSettings, StoreError> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::GuildSettings::find_by_id(guild_id.to_string())
            .one(&txn)
            .await?
            .map(|row| row.document)
            .unwrap_or(Value::Null);

        let document = update.merge_into(existing);

        entity::prelude::GuildSettings::insert(entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            document: ActiveValue::Set(document.clone()),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::guild_settings::Column::GuildId)
                .update_columns([
                    entity::guild_settings::Column::Document,
                    entity::guild_settings::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(&txn)
        .await?;

        txn.commit().await?;

        GuildSettings::from_document(guild_id, &document)
    }
}
