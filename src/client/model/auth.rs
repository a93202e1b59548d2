use dioxus::prelude::*;

use crate::{
    client::model::error::ApiError,
    model::user::{DiscordUserDto, SessionDto},
};

#[derive(Clone, Debug, PartialEq)]
pub enum AuthState {
    /// Initial state - haven't read the session yet
    Initializing,
    /// Logged in with Discord
    Authenticated(SessionDto),
    /// Session read, no Discord login
    NotLoggedIn(SessionDto),
    /// Failed to read the session
    Error(ApiError),
}

impl From<SessionDto> for AuthState {
    fn from(session: SessionDto) -> Self {
        if session.is_authenticated && session.user.is_some() {
            AuthState::Authenticated(session)
        } else {
            AuthState::NotLoggedIn(session)
        }
    }
}

impl AuthState {
    pub fn is_initializing(&self) -> bool {
        matches!(self, AuthState::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    fn session(&self) -> Option<&SessionDto> {
        match self {
            AuthState::Authenticated(session) | AuthState::NotLoggedIn(session) => Some(session),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&DiscordUserDto> {
        match self {
            AuthState::Authenticated(session) => session.user.as_ref(),
            _ => None,
        }
    }

    pub fn backing_store_user_id(&self) -> Option<&str> {
        self.session()
            .and_then(|session| session.backing_store_user_id.as_deref())
    }
}

/// Where the login link points, carrying a guild to open after the redirect.
pub fn login_href(guild_id: Option<u64>) -> String {
    match guild_id {
        Some(guild_id) => format!("/api/auth/login?guild_id={}", guild_id),
        None => "/api/auth/login".to_string(),
    }
}

pub const LOGOUT_HREF: &str = "/api/auth/logout";

/// Client-side handle on the session, provided as context by `App`.
///
/// Holds the merged authentication state and the last login error separately, so the
/// error can be dismissed without touching the session.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    state: Signal<AuthState>,
    auth_error: Signal<Option<String>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self {
            state: Signal::new(AuthState::Initializing),
            auth_error: Signal::new(None),
        }
    }

    pub fn read(&self) -> impl std::ops::Deref<Target = AuthState> + '_ {
        self.state.read()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn user(&self) -> Option<DiscordUserDto> {
        self.state.read().user().cloned()
    }

    /// Identity the server uses against the settings store, shown on hover in the header.
    pub fn backing_store_user_id(&self) -> Option<String> {
        self.state.read().backing_store_user_id().map(str::to_string)
    }

    pub fn auth_error(&self) -> Option<String> {
        self.auth_error.read().clone()
    }

    /// Stores the result of `GET /api/auth/session`, moving any login error aside.
    pub fn login(&mut self, result: Result<SessionDto, ApiError>) {
        match result {
            Ok(mut session) => {
                if let Some(message) = session.auth_error.take() {
                    self.auth_error.set(Some(message));
                }
                self.state.set(AuthState::from(session));
            }
            Err(err) => self.state.set(AuthState::Error(err)),
        }
    }

    /// Drops the local view of the session; the server side is cleared by following
    /// [`LOGOUT_HREF`].
    pub fn logout(&mut self) {
        self.state.set(AuthState::NotLoggedIn(SessionDto::default()));
    }

    pub fn dismiss_error(&mut self) {
        self.auth_error.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> DiscordUserDto {
        DiscordUserDto {
            id: 1,
            username: "ferris".to_string(),
            discriminator: None,
            avatar: None,
        }
    }

    #[test]
    fn authenticated_requires_user() {
        let state = AuthState::from(SessionDto {
            is_authenticated: true,
            user: None,
            ..Default::default()
        });

        assert!(!state.is_authenticated());
    }

    #[test]
    fn exposes_user_and_store_identity() {
        let state = AuthState::from(SessionDto {
            is_authenticated: true,
            user: Some(user()),
            backing_store_user_id: Some("uid".to_string()),
            auth_error: None,
        });

        assert!(state.is_authenticated());
        assert_eq!(state.user().map(|u| u.id), Some(1));
        assert_eq!(state.backing_store_user_id(), Some("uid"));
    }

    #[test]
    fn failed_login_session_is_anonymous() {
        let state = AuthState::from(SessionDto {
            is_authenticated: false,
            user: None,
            backing_store_user_id: Some("uid".to_string()),
            auth_error: Some("Discord did not accept the login".to_string()),
        });

        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
        assert_eq!(state.backing_store_user_id(), Some("uid"));
    }

    #[test]
    fn login_href_carries_guild() {
        assert_eq!(login_href(None), "/api/auth/login");
        assert_eq!(login_href(Some(5)), "/api/auth/login?guild_id=5");
    }
}
