use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

/// The caller's Discord identity as shown by the dashboard.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct DiscordUserDto {
    #[serde(with = "crate::model::snowflake::as_string")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: u64,
    pub username: String,
    /// Legacy `#1234` tag, `None` or `"0"` for migrated usernames.
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
}

impl DiscordUserDto {
    /// CDN URL of the user's avatar, falling back to Discord's default avatar.
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => format!(
                "https://cdn.discordapp.com/avatars/{}/{}.png?size=64",
                self.id, hash
            ),
            None => {
                let index = (self.id >> 22) % 6;
                format!("https://cdn.discordapp.com/embed/avatars/{}.png", index)
            }
        }
    }

    /// `name#1234` for legacy accounts, plain `name` otherwise.
    pub fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some(discriminator) if discriminator != "0" && !discriminator.is_empty() => {
                format!("{}#{}", self.username, discriminator)
            }
            _ => self.username.clone(),
        }
    }
}

/// Projection of the server-side session handed to the client on page load.
///
/// The Discord access token stays on the server and is never part of this DTO.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct SessionDto {
    pub is_authenticated: bool,
    pub user: Option<DiscordUserDto>,
    /// Backing-store identity, `None` when the bootstrap failed.
    pub backing_store_user_id: Option<String>,
    /// One-shot message from a failed login attempt.
    pub auth_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(discriminator: Option<&str>, avatar: Option<&str>) -> DiscordUserDto {
        DiscordUserDto {
            id: 80351110224678912,
            username: "nelly".to_string(),
            discriminator: discriminator.map(str::to_string),
            avatar: avatar.map(str::to_string),
        }
    }

    #[test]
    fn tag_includes_legacy_discriminator() {
        assert_eq!(user(Some("1337"), None).tag(), "nelly#1337");
        assert_eq!(user(Some("0"), None).tag(), "nelly");
        assert_eq!(user(None, None).tag(), "nelly");
    }

    #[test]
    fn avatar_url_uses_hash_when_present() {
        let url = user(None, Some("8342729096ea3675442027381ff50dfe")).avatar_url();
        assert_eq!(
            url,
            "https://cdn.discordapp.com/avatars/80351110224678912/8342729096ea3675442027381ff50dfe.png?size=64"
        );

        let fallback = user(None, None).avatar_url();
        assert!(fallback.starts_with("https://cdn.discordapp.com/embed/avatars/"));
    }
}
