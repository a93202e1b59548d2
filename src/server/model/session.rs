//! Values carried through the login and identity bootstrap flows.

use crate::model::{guild::GuildDto, user::DiscordUserDto};

/// Result of a completed OAuth callback.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub user: DiscordUserDto,
    pub access_token: String,
    /// Guilds where the caller holds the administrator permission.
    pub guilds: Vec<GuildDto>,
}

/// A backing-store identity established for the browser session.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreIdentity {
    pub user_id: String,
    /// Bearer token for the hosted store, `None` for the local store.
    pub id_token: Option<String>,
}
