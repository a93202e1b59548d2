use crate::{client::model::error::ApiError, model::guild::GuildListDto};

use super::helper::{get, parse_response, send_request};

/// Get the servers the user administers and the bot invite link
pub async fn get_guilds() -> Result<GuildListDto, ApiError> {
    let response = send_request(get("/api/guilds")).await?;
    parse_response(response).await
}
