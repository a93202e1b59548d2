use dioxus::prelude::*;

use crate::client::component::{Layout, RequiresLoggedIn};
use crate::client::route::{GuildSettings, Home, Login, NotFound};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    // `guild_id` is carried through the Discord login and back to `Home`
    #[route("/login?:guild_id")]
    Login { guild_id: String },

    #[layout(RequiresLoggedIn)]
    // `guild_id` preselects a server after login
    #[route("/?:guild_id")]
    Home { guild_id: String },

    #[route("/guilds/:guild_id")]
    GuildSettings { guild_id: u64 },
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// The guild a visitor was trying to reach, kept across a login redirect.
    pub fn requested_guild(&self) -> Option<u64> {
        match self {
            Route::Home { guild_id } | Route::Login { guild_id } => guild_id.parse().ok(),
            Route::GuildSettings { guild_id } => Some(*guild_id),
            Route::NotFound { .. } => None,
        }
    }

    /// Login page for a visitor who landed on this route without a session.
    pub fn login_redirect(&self) -> Route {
        Route::Login {
            guild_id: self
                .requested_guild()
                .map(|guild_id| guild_id.to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_redirect_keeps_preselected_guild() {
        let route = Route::Home {
            guild_id: "42".to_string(),
        };

        assert_eq!(
            route.login_redirect(),
            Route::Login {
                guild_id: "42".to_string()
            }
        );
    }

    #[test]
    fn login_redirect_from_settings_page_keeps_guild() {
        let route = Route::GuildSettings { guild_id: 7 };

        assert_eq!(route.login_redirect().requested_guild(), Some(7));
    }

    #[test]
    fn malformed_guild_is_not_forwarded() {
        let route = Route::Home {
            guild_id: "abc".to_string(),
        };

        assert_eq!(route.requested_guild(), None);
        assert_eq!(
            route.login_redirect(),
            Route::Login {
                guild_id: String::new()
            }
        );
    }

    #[test]
    fn login_route_parses_guild_query() {
        let route = "/login?guild_id=42".parse::<Route>().ok();

        assert_eq!(route.and_then(|route| route.requested_guild()), Some(42));
    }
}
