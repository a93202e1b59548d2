use crate::{
    client::model::error::ApiError,
    model::settings::{GuildSettingsDto, SettingsViewDto, UpdateGuildSettingsDto},
};

use super::helper::{get, parse_response, put, send_request, serialize_json};

/// Get a server's roles, text channels and saved settings
pub async fn get_settings(guild_id: u64) -> Result<SettingsViewDto, ApiError> {
    let url = format!("/api/guilds/{}/settings", guild_id);
    let response = send_request(get(&url)).await?;
    parse_response(response).await
}

/// Save the editable settings fields, returning the stored document
pub async fn update_settings(
    guild_id: u64,
    payload: &UpdateGuildSettingsDto,
) -> Result<GuildSettingsDto, ApiError> {
    let url = format!("/api/guilds/{}/settings", guild_id);
    let body = serialize_json(payload)?;
    let response = send_request(put(&url).body(body)).await?;
    parse_response(response).await
}
