use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::{AuthSession, AuthenticatedUser},
};

pub enum Permission {
    /// Caller holds the administrator bit in the given guild.
    GuildAdmin(u64),
}

pub struct AuthGuard<'a> {
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Requires a logged-in Discord user holding every listed permission.
    ///
    /// Guild permissions are checked against the administered guild list captured at
    /// login, not re-fetched from Discord.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - Caller is logged in and passes every check
    /// - `Err(AuthError::UserNotInSession)` - No Discord identity in session
    /// - `Err(AuthError::GuildAccessDenied)` - Caller does not administer a listed guild
    pub async fn require(&self, permissions: &[Permission]) -> Result<AuthenticatedUser, AppError> {
        let Some(auth) = AuthSession::new(self.session).get().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        for permission in permissions {
            match permission {
                Permission::GuildAdmin(guild_id) => {
                    if !auth.guilds.iter().any(|guild| guild.id == *guild_id) {
                        return Err(AuthError::GuildAccessDenied {
                            user_id: auth.user.id,
                            guild_id: *guild_id,
                        }
                        .into());
                    }
                }
            }
        }

        Ok(auth)
    }
}
