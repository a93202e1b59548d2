use std::collections::HashSet;

use dioxus_logger::tracing;

use crate::{
    model::settings::{GuildSettingsDto, SettingsViewDto, UpdateGuildSettingsDto, MAX_AUTO_ROLES},
    server::{
        data::store::DocumentStore,
        error::AppError,
        model::{
            discord::{Guild, GuildChannel, GuildRole},
            session::StoreIdentity,
            settings::{GuildSettings, SettingsUpdate},
        },
        service::discord::{prepare_roles, text_channels, DiscordApiClient},
    },
};

/// Loads and saves a guild's auto-role and welcome settings.
///
/// Reads combine live Discord data (guild, roles, channels) with the stored document;
/// writes go to the document store only.
pub struct SettingsService<'a> {
    http_client: &'a reqwest::Client,
    discord_api_url: &'a str,
    store: &'a DocumentStore,
}

impl<'a> SettingsService<'a> {
    pub fn new(
        http_client: &'a reqwest::Client,
        discord_api_url: &'a str,
        store: &'a DocumentStore,
    ) -> Self {
        Self {
            http_client,
            discord_api_url,
            store,
        }
    }

    /// Fetches everything the settings view needs.
    ///
    /// The guild, its roles, its channels and the stored document are requested
    /// concurrently. The first failure cancels the others and is returned.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to load
    /// - `access_token` - Caller's Discord access token
    /// - `identity` - Caller's backing-store identity, if bootstrapped
    ///
    /// # Returns
    /// - `Ok(SettingsViewDto)` - Guild summary, sorted roles, text channels and settings
    /// - `Err(AppError::DiscordErr)` - A Discord request failed
    /// - `Err(AppError::StoreErr)` - The document could not be read
    pub async fn load_view(
        &self,
        guild_id: u64,
        access_token: &str,
        identity: Option<&StoreIdentity>,
    ) -> Result<SettingsViewDto, AppError> {
        let discord = DiscordApiClient::new(self.http_client, self.discord_api_url, access_token);

        let (guild, roles, channels, settings) = tokio::try_join!(
            async { discord.fetch_guild(guild_id).await.map_err(AppError::from) },
            async { discord.fetch_guild_roles(guild_id).await.map_err(AppError::from) },
            async { discord.fetch_guild_channels(guild_id).await.map_err(AppError::from) },
            async { self.store.find(guild_id, identity).await.map_err(AppError::from) },
        )?;

        Ok(assemble_view(guild_id, guild, roles, channels, settings))
    }

    /// Validates and merge-writes the editable settings.
    ///
    /// # Arguments
    /// - `guild_id` - Guild being configured
    /// - `payload` - Edited role selection, welcome channel and message
    /// - `discord_user_id` - Caller, recorded as the author of the change
    /// - `identity` - Caller's backing-store identity, recorded when present
    ///
    /// # Returns
    /// - `Ok(GuildSettingsDto)` - Settings as stored after the write
    /// - `Err(AppError::BadRequest)` - Too many or duplicate roles
    /// - `Err(AppError::StoreErr)` - The write was rejected
    pub async fn save(
        &self,
        guild_id: u64,
        payload: UpdateGuildSettingsDto,
        discord_user_id: u64,
        identity: Option<&StoreIdentity>,
    ) -> Result<GuildSettingsDto, AppError> {
        validate_update(&payload)?;

        let update = SettingsUpdate::new(
            payload,
            discord_user_id,
            identity.map(|identity| identity.user_id.clone()),
        );
        let saved = self.store.merge(guild_id, &update, identity).await?;

        tracing::info!(
            "User {} saved settings for guild {} ({} auto roles, {} store)",
            discord_user_id,
            guild_id,
            saved.auto_role_ids.len(),
            self.store.name()
        );

        Ok(saved.into_dto())
    }
}

/// Combines the four reads into the view, substituting defaults for a missing document.
pub fn assemble_view(
    guild_id: u64,
    guild: Guild,
    roles: Vec<GuildRole>,
    channels: Vec<GuildChannel>,
    settings: Option<GuildSettings>,
) -> SettingsViewDto {
    SettingsViewDto {
        guild: guild.into_dto(),
        roles: prepare_roles(guild_id, roles),
        channels: text_channels(channels),
        settings: settings
            .map(GuildSettings::into_dto)
            .unwrap_or_default(),
        invite_url: String::new(),
    }
}

/// Rejects payloads the selector would never produce instead of truncating them.
pub fn validate_update(payload: &UpdateGuildSettingsDto) -> Result<(), AppError> {
    if payload.auto_role_ids.len() > MAX_AUTO_ROLES {
        return Err(AppError::BadRequest(format!(
            "You can select at most {} auto roles.",
            MAX_AUTO_ROLES
        )));
    }

    let mut seen = HashSet::new();
    if !payload.auto_role_ids.iter().all(|id| seen.insert(*id)) {
        return Err(AppError::BadRequest(
            "Each auto role can only be selected once.".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::DEFAULT_WELCOME_MESSAGE;
    use serde_json::json;
    use test_utils::builder::TestBuilder;

    fn payload(auto_role_ids: Vec<u64>) -> UpdateGuildSettingsDto {
        UpdateGuildSettingsDto {
            auto_role_ids,
            welcome_channel_id: Some(300),
            welcome_message: "Hi {user}".to_string(),
        }
    }

    #[test]
    fn rejects_more_than_five_roles() {
        let result = validate_update(&payload(vec![1, 2, 3, 4, 5, 6]));

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn accepts_exactly_five_roles() {
        assert!(validate_update(&payload(vec![1, 2, 3, 4, 5])).is_ok());
    }

    #[test]
    fn rejects_duplicate_roles() {
        let result = validate_update(&payload(vec![1, 1]));

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn missing_document_uses_defaults() {
        let guild: Guild =
            serde_json::from_value(json!({"id": "9", "name": "Crabs", "approximate_member_count": 40}))
                .unwrap();

        let view = assemble_view(9, guild, Vec::new(), Vec::new(), None);

        assert!(view.settings.auto_role_ids.is_empty());
        assert_eq!(view.settings.welcome_channel_id, None);
        assert_eq!(view.settings.welcome_message, DEFAULT_WELCOME_MESSAGE);
        assert_eq!(view.guild.approximate_member_count, Some(40));
    }

    /// Tests that a save followed by a read returns the three edited fields.
    ///
    /// Expected: Ok with identical role list, channel and message
    #[tokio::test]
    async fn saved_settings_read_back() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_settings_tables()
            .build()
            .await
            .unwrap();
        let store = DocumentStore::Sqlite(test.db.clone().unwrap());
        let http_client = reqwest::Client::new();
        let service = SettingsService::new(&http_client, "http://unused", &store);

        let saved = service.save(42, payload(vec![7, 8]), 1001, None).await?;
        let stored = store.find(42, None).await?.unwrap().into_dto();

        assert_eq!(stored.auto_role_ids, vec![7, 8]);
        assert_eq!(stored.welcome_channel_id, Some(300));
        assert_eq!(stored.welcome_message, "Hi {user}");
        assert_eq!(stored.updated_by_discord_id, Some(1001));
        assert_eq!(saved, stored);

        Ok(())
    }

    /// Tests that an invalid payload never reaches the store.
    ///
    /// Expected: Err(BadRequest) and no document written
    #[tokio::test]
    async fn invalid_save_writes_nothing() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_settings_tables()
            .build()
            .await
            .unwrap();
        let store = DocumentStore::Sqlite(test.db.clone().unwrap());
        let http_client = reqwest::Client::new();
        let service = SettingsService::new(&http_client, "http://unused", &store);

        let result = service
            .save(42, payload(vec![1, 2, 3, 4, 5, 6]), 1001, None)
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(store.find(42, None).await?.is_none());

        Ok(())
    }
}
