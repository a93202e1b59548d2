use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

/// A guild the caller administers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct GuildDto {
    #[serde(with = "crate::model::snowflake::as_string")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
    /// The caller's permission bits in this guild.
    #[serde(with = "crate::model::snowflake::as_string")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub permissions: u64,
}

impl GuildDto {
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|hash| format!("https://cdn.discordapp.com/icons/{}/{}.png", self.id, hash))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct GuildListDto {
    pub guilds: Vec<GuildDto>,
    /// Link for adding the bot to any server.
    pub invite_url: String,
}
