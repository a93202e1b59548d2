use url::Url;

use crate::server::error::{internal::InternalError, AppError};

const DISCORD_AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";

/// Manage Roles and Send Messages.
pub const BOT_PERMISSIONS: u64 = 268437504;

/// Builds the bot invite link.
///
/// With a `guild_id`, Discord opens the consent screen with that server preselected and
/// the picker locked.
pub fn invite_url(client_id: &str, guild_id: Option<u64>) -> Result<String, AppError> {
    let mut url = Url::parse(DISCORD_AUTHORIZE_URL).map_err(|source| InternalError::InvalidUrl {
        value: DISCORD_AUTHORIZE_URL.to_string(),
        source,
    })?;

    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("permissions", &BOT_PERMISSIONS.to_string())
        .append_pair("scope", "bot applications.commands");

    if let Some(guild_id) = guild_id {
        url.query_pairs_mut()
            .append_pair("guild_id", &guild_id.to_string())
            .append_pair("disable_guild_select", "true");
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_generic_invite() {
        let url = invite_url("1234", None).unwrap();

        assert_eq!(
            url,
            "https://discord.com/oauth2/authorize?client_id=1234&permissions=268437504&scope=bot+applications.commands"
        );
    }

    #[test]
    fn builds_guild_invite() {
        let url = invite_url("1234", Some(99)).unwrap();

        assert!(url.ends_with("&guild_id=99&disable_guild_select=true"));
    }
}
