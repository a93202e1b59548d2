//! Type-safe session management wrappers.
//!
//! This module provides type-safe interfaces for managing different aspects of user sessions,
//! organized by concern. Each struct handles a specific domain of session data, preventing
//! typos in keys, ensuring type consistency, and centralizing session-related logic.
//!
//! # Architecture
//!
//! - `AuthSession` - Discord identity, access token and administered guilds
//! - `StoreSession` - Backing-store identity created by the bootstrap
//! - `CsrfSession` - CSRF token management for the OAuth flow
//! - `OAuthFlowSession` - State carried across the Discord redirect (preselected guild,
//!   last login error)
//!
//! Each struct wraps the same underlying `Session`. The Discord and backing-store identities
//! live under disjoint keys so clearing one never touches the other.

use tower_sessions::Session;

use crate::{
    model::{guild::GuildDto, user::DiscordUserDto},
    server::{
        error::AppError,
        model::session::{LoginOutcome, StoreIdentity},
        util::parse::parse_u64_from_string,
    },
};

const SESSION_AUTH_USER: &str = "auth:user";
const SESSION_AUTH_ACCESS_TOKEN: &str = "auth:access_token";
const SESSION_AUTH_GUILDS: &str = "auth:guilds";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_AUTH_PENDING_GUILD: &str = "auth:pending_guild";
const SESSION_AUTH_ERROR: &str = "auth:error";
const SESSION_STORE_USER_ID: &str = "store:user_id";
const SESSION_STORE_ID_TOKEN: &str = "store:id_token";

/// Authenticated Discord identity as read back from the session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user: DiscordUserDto,
    pub access_token: String,
    pub guilds: Vec<GuildDto>,
}

/// Authentication session management.
///
/// Holds the external identity half of the session: Discord profile, access token and the
/// guilds the user administers. All three are written together and cleared together.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores a completed login.
    ///
    /// The session ID is cycled first so a pre-login session cookie cannot be reused to
    /// ride the authenticated session.
    pub async fn set_login(&self, outcome: LoginOutcome) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_USER, outcome.user).await?;
        self.session
            .insert(SESSION_AUTH_ACCESS_TOKEN, outcome.access_token)
            .await?;
        self.session
            .insert(SESSION_AUTH_GUILDS, outcome.guilds)
            .await?;
        Ok(())
    }

    /// Retrieves the authenticated user.
    ///
    /// # Returns
    /// - `Ok(Some(AuthenticatedUser))` - Profile and access token are both present
    /// - `Ok(None)` - Not logged in, or only a partial login state remains
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get(&self) -> Result<Option<AuthenticatedUser>, AppError> {
        let Some(user) = self
            .session
            .get::<DiscordUserDto>(SESSION_AUTH_USER)
            .await?
        else {
            return Ok(None);
        };

        let Some(access_token) = self
            .session
            .get::<String>(SESSION_AUTH_ACCESS_TOKEN)
            .await?
        else {
            return Ok(None);
        };

        let guilds = self
            .session
            .get::<Vec<GuildDto>>(SESSION_AUTH_GUILDS)
            .await?
            .unwrap_or_default();

        Ok(Some(AuthenticatedUser {
            user,
            access_token,
            guilds,
        }))
    }

    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        Ok(self.get().await?.is_some())
    }

    /// Removes the Discord identity, leaving the backing-store identity in place.
    pub async fn clear_identity(&self) -> Result<(), AppError> {
        self.session
            .remove::<DiscordUserDto>(SESSION_AUTH_USER)
            .await?;
        self.session
            .remove::<String>(SESSION_AUTH_ACCESS_TOKEN)
            .await?;
        self.session
            .remove::<Vec<GuildDto>>(SESSION_AUTH_GUILDS)
            .await?;
        Ok(())
    }

    /// Clears all data from the session, used on logout.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// Backing-store identity management.
pub struct StoreSession<'a> {
    session: &'a Session,
}

impl<'a> StoreSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_identity(&self, identity: StoreIdentity) -> Result<(), AppError> {
        self.session
            .insert(SESSION_STORE_USER_ID, identity.user_id)
            .await?;
        match identity.id_token {
            Some(token) => self.session.insert(SESSION_STORE_ID_TOKEN, token).await?,
            None => {
                self.session
                    .remove::<String>(SESSION_STORE_ID_TOKEN)
                    .await?;
            }
        }
        Ok(())
    }

    /// # Returns
    /// - `Ok(Some(StoreIdentity))` - The bootstrap has run successfully for this session
    /// - `Ok(None)` - No backing-store identity yet
    pub async fn get_identity(&self) -> Result<Option<StoreIdentity>, AppError> {
        let Some(user_id) = self.session.get::<String>(SESSION_STORE_USER_ID).await? else {
            return Ok(None);
        };
        let id_token = self.session.get::<String>(SESSION_STORE_ID_TOKEN).await?;

        Ok(Some(StoreIdentity { user_id, id_token }))
    }
}

/// CSRF protection session management.
///
/// Tokens are stored when the login redirect is issued and consumed by the callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token so each token validates at most one callback.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

/// State that must survive the round trip through Discord's consent screen.
pub struct OAuthFlowSession<'a> {
    session: &'a Session,
}

impl<'a> OAuthFlowSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Remembers the guild the user wanted to open before being sent to login.
    pub async fn set_pending_guild(&self, guild_id: u64) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_PENDING_GUILD, guild_id.to_string())
            .await?;
        Ok(())
    }

    pub async fn take_pending_guild(&self) -> Result<Option<u64>, AppError> {
        let Some(value) = self
            .session
            .remove::<String>(SESSION_AUTH_PENDING_GUILD)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(parse_u64_from_string(value)?))
    }

    /// Records a login failure for the next session read to report.
    pub async fn set_auth_error(&self, message: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_ERROR, message).await?;
        Ok(())
    }

    pub async fn take_auth_error(&self) -> Result<Option<String>, AppError> {
        let message = self.session.remove(SESSION_AUTH_ERROR).await?;
        Ok(message)
    }
}
