//! Discord REST payloads consumed by the dashboard.
//!
//! Only the fields the dashboard reads are declared; Discord sends many more and serde
//! ignores them. IDs use Serenity's snowflake types, which accept Discord's string encoding.

use serde::{Deserialize, Deserializer};
use serenity::all::{ChannelId, ChannelType, GuildId, Permissions, RoleId, UserId};

use crate::model::{
    guild::GuildDto,
    settings::{ChannelDto, GuildSummaryDto, RoleDto},
    user::DiscordUserDto,
};

/// `GET /users/@me`
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl DiscordUser {
    pub fn into_dto(self) -> DiscordUserDto {
        DiscordUserDto {
            id: self.id.get(),
            username: self.username,
            discriminator: self.discriminator,
            avatar: self.avatar,
        }
    }
}

/// Entry of `GET /users/@me/guilds`.
#[derive(Debug, Clone, Deserialize)]
pub struct PartialGuild {
    pub id: GuildId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// The caller's effective permissions in the guild.
    #[serde(deserialize_with = "deserialize_permissions")]
    pub permissions: Permissions,
}

impl PartialGuild {
    /// Whether the administrator bit (`0x8`) is set.
    pub fn is_administrator(&self) -> bool {
        self.permissions.contains(Permissions::ADMINISTRATOR)
    }

    pub fn into_dto(self) -> GuildDto {
        GuildDto {
            id: self.id.get(),
            name: self.name,
            icon: self.icon,
            permissions: self.permissions.bits(),
        }
    }
}

/// `GET /guilds/{id}?with_counts=true`
#[derive(Debug, Clone, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub approximate_member_count: Option<u64>,
}

impl Guild {
    pub fn into_dto(self) -> GuildSummaryDto {
        GuildSummaryDto {
            id: self.id.get(),
            name: self.name,
            icon: self.icon,
            approximate_member_count: self.approximate_member_count,
        }
    }
}

/// Entry of `GET /guilds/{id}/roles`.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildRole {
    pub id: RoleId,
    pub name: String,
    pub position: i32,
    #[serde(default)]
    pub color: u32,
}

impl GuildRole {
    pub fn into_dto(self) -> RoleDto {
        // Uncolored roles render with Discord's default grey
        let color = if self.color == 0 {
            "#99AAB5".to_string()
        } else {
            format!("#{:06X}", self.color)
        };

        RoleDto {
            id: self.id.get(),
            name: self.name,
            position: self.position,
            color,
        }
    }
}

/// Entry of `GET /guilds/{id}/channels`.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildChannel {
    pub id: ChannelId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(default)]
    pub position: i32,
}

impl GuildChannel {
    pub fn is_text(&self) -> bool {
        self.kind == ChannelType::Text
    }

    pub fn into_dto(self) -> ChannelDto {
        ChannelDto {
            id: self.id.get(),
            name: self.name.unwrap_or_default(),
            position: self.position,
        }
    }
}

/// Discord sends permission bitsets as decimal strings; older payloads used integers.
fn deserialize_permissions<'de, D>(deserializer: D) -> Result<Permissions, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bits {
        Text(String),
        Number(u64),
    }

    let bits = match Bits::deserialize(deserializer)? {
        Bits::Text(text) => text.parse::<u64>().map_err(D::Error::custom)?,
        Bits::Number(number) => number,
    };

    Ok(Permissions::from_bits_truncate(bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_partial_guild_with_string_permissions() {
        let guild: PartialGuild = serde_json::from_value(json!({
            "id": "80351110224678912",
            "name": "Rustaceans",
            "icon": null,
            "owner": false,
            "permissions": "2147483656",
            "features": []
        }))
        .unwrap();

        assert_eq!(guild.id.get(), 80351110224678912);
        assert!(guild.is_administrator());
    }

    #[test]
    fn parses_numeric_permissions() {
        let guild: PartialGuild = serde_json::from_value(json!({
            "id": "1",
            "name": "Legacy",
            "permissions": 6
        }))
        .unwrap();

        assert!(!guild.is_administrator());
    }

    #[test]
    fn role_color_is_hex_encoded() {
        let role: GuildRole = serde_json::from_value(json!({
            "id": "41771983423143936",
            "name": "Moderator",
            "color": 3447003,
            "position": 4,
            "permissions": "0"
        }))
        .unwrap();

        let dto = role.into_dto();
        assert_eq!(dto.color, "#3498DB");
        assert_eq!(dto.position, 4);
    }

    #[test]
    fn recognizes_text_channels() {
        let text: GuildChannel =
            serde_json::from_value(json!({"id": "10", "name": "general", "type": 0, "position": 1}))
                .unwrap();
        let voice: GuildChannel =
            serde_json::from_value(json!({"id": "11", "name": "Lounge", "type": 2, "position": 2}))
                .unwrap();

        assert!(text.is_text());
        assert!(!voice.is_text());
    }
}
