use dioxus_logger::tracing;
use serde::de::DeserializeOwned;

use crate::{
    model::{
        guild::GuildDto,
        settings::{ChannelDto, RoleDto},
    },
    server::{
        error::discord::DiscordApiError,
        model::discord::{DiscordUser, Guild, GuildChannel, GuildRole, PartialGuild},
    },
};

/// Discord REST client acting on behalf of a logged-in user.
///
/// Every request carries the user's OAuth access token as a bearer token, so results are
/// limited to what that user can see.
pub struct DiscordApiClient<'a> {
    http_client: &'a reqwest::Client,
    api_url: &'a str,
    access_token: &'a str,
}

impl<'a> DiscordApiClient<'a> {
    pub fn new(http_client: &'a reqwest::Client, api_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http_client,
            api_url,
            access_token,
        }
    }

    /// `GET /users/@me`
    pub async fn fetch_current_user(&self) -> Result<DiscordUser, DiscordApiError> {
        self.get("/users/@me").await
    }

    /// `GET /users/@me/guilds`
    pub async fn fetch_current_user_guilds(&self) -> Result<Vec<PartialGuild>, DiscordApiError> {
        self.get("/users/@me/guilds").await
    }

    /// `GET /guilds/{id}` including the approximate member count.
    pub async fn fetch_guild(&self, guild_id: u64) -> Result<Guild, DiscordApiError> {
        self.get(&format!("/guilds/{}?with_counts=true", guild_id))
            .await
    }

    pub async fn fetch_guild_roles(&self, guild_id: u64) -> Result<Vec<GuildRole>, DiscordApiError> {
        self.get(&format!("/guilds/{}/roles", guild_id)).await
    }

    pub async fn fetch_guild_channels(
        &self,
        guild_id: u64,
    ) -> Result<Vec<GuildChannel>, DiscordApiError> {
        self.get(&format!("/guilds/{}/channels", guild_id)).await
    }

    /// Issues an authenticated GET and decodes the JSON body.
    ///
    /// # Returns
    /// - `Ok(T)` - Success status and a body matching `T`
    /// - `Err(DiscordApiError::Status)` - Discord answered with a non-success status
    /// - `Err(DiscordApiError::Request)` - Transport failure or undecodable body
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, DiscordApiError> {
        let response = self
            .http_client
            .get(format!("{}{}", self.api_url, endpoint))
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await
            .map_err(|source| DiscordApiError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Discord {} returned {}", endpoint, status);
            return Err(DiscordApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| DiscordApiError::Request {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}

/// Keeps the guilds where the caller holds the administrator permission.
pub fn filter_administered(guilds: Vec<PartialGuild>) -> Vec<GuildDto> {
    guilds
        .into_iter()
        .filter(PartialGuild::is_administrator)
        .map(PartialGuild::into_dto)
        .collect()
}

/// Orders roles highest first and drops the implicit `@everyone` role, whose ID equals
/// the guild ID.
pub fn prepare_roles(guild_id: u64, roles: Vec<GuildRole>) -> Vec<RoleDto> {
    let mut roles: Vec<GuildRole> = roles
        .into_iter()
        .filter(|role| role.id.get() != guild_id)
        .collect();
    roles.sort_by(|a, b| b.position.cmp(&a.position));

    roles.into_iter().map(GuildRole::into_dto).collect()
}

/// Keeps text channels, in sidebar order.
pub fn text_channels(channels: Vec<GuildChannel>) -> Vec<ChannelDto> {
    let mut channels: Vec<GuildChannel> = channels
        .into_iter()
        .filter(GuildChannel::is_text)
        .collect();
    channels.sort_by_key(|channel| channel.position);

    channels.into_iter().map(GuildChannel::into_dto).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn partial_guild(id: u64, permissions: u64) -> PartialGuild {
        serde_json::from_value(json!({
            "id": id.to_string(),
            "name": format!("Guild {}", id),
            "permissions": permissions.to_string()
        }))
        .unwrap()
    }

    fn role(id: u64, position: i32) -> GuildRole {
        serde_json::from_value(json!({
            "id": id.to_string(),
            "name": format!("Role {}", id),
            "position": position,
            "color": 0
        }))
        .unwrap()
    }

    #[test]
    fn keeps_only_administered_guilds() {
        let guilds = vec![
            partial_guild(1, 0x8),
            partial_guild(2, 0x6),
            partial_guild(3, 0x18),
        ];

        let ids: Vec<u64> = filter_administered(guilds).iter().map(|g| g.id).collect();

        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn administered_guild_keeps_permission_bits() {
        let guilds = filter_administered(vec![partial_guild(1, 0x18)]);

        assert_eq!(guilds[0].permissions, 0x18);
    }

    #[test]
    fn roles_sorted_descending_without_everyone() {
        let guild_id = 500;
        let roles = vec![role(10, 1), role(guild_id, 0), role(11, 7), role(12, 3)];

        let prepared = prepare_roles(guild_id, roles);

        let ids: Vec<u64> = prepared.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
        assert!(prepared
            .windows(2)
            .all(|pair| pair[0].position > pair[1].position));
    }

    #[test]
    fn channels_filtered_to_text() {
        let channels: Vec<GuildChannel> = serde_json::from_value(json!([
            {"id": "1", "name": "rules", "type": 0, "position": 2},
            {"id": "2", "name": "Voice", "type": 2, "position": 0},
            {"id": "3", "name": "Info", "type": 4, "position": 0},
            {"id": "4", "name": "general", "type": 0, "position": 1}
        ]))
        .unwrap();

        let names: Vec<String> = text_channels(channels)
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["general", "rules"]);
    }
}
