use dioxus_logger::tracing;
use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::session::LoginOutcome,
    service::discord::{filter_administered, DiscordApiClient},
    state::OAuth2Client,
};

/// Scopes requested at login and repeated on the token exchange.
pub const LOGIN_SCOPES: [&str; 2] = ["identify", "guilds"];

/// Service for the Discord OAuth2 login flow.
///
/// Builds the authorize URL and turns an authorization code into a `LoginOutcome`: the
/// caller's profile, access token and the guilds they administer.
pub struct AuthService<'a> {
    /// HTTP client for token exchange and Discord API requests.
    pub http_client: &'a reqwest::Client,
    /// OAuth2 client configured with Discord's endpoints and app credentials.
    pub oauth_client: &'a OAuth2Client,
    /// Base URL of the Discord REST API.
    pub discord_api_url: &'a str,
}

impl<'a> AuthService<'a> {
    pub fn new(
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        discord_api_url: &'a str,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            discord_api_url,
        }
    }

    /// Generates a Discord OAuth2 login URL with CSRF protection.
    ///
    /// Requests the `identify` and `guilds` scopes, enough to read the profile and the
    /// caller's guild permissions.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Authorization URL and the state token to validate on callback
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(LOGIN_SCOPES.map(|scope| Scope::new(scope.to_string())))
            .url()
    }

    /// Completes the OAuth callback.
    ///
    /// Runs strictly in order: exchange the code, fetch the profile, fetch guild
    /// memberships, keep the administered ones. The first failing step aborts the rest.
    ///
    /// # Arguments
    /// - `authorization_code` - `code` query parameter from Discord's redirect
    ///
    /// # Returns
    /// - `Ok(LoginOutcome)` - Profile, access token and administered guilds
    /// - `Err(AppError::AuthErr(AuthError::TokenExchange))` - Discord rejected the code
    /// - `Err(AppError::DiscordErr)` - Profile or guild request failed
    pub async fn callback(&self, authorization_code: String) -> Result<LoginOutcome, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .add_extra_param("scope", LOGIN_SCOPES.join(" "))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
        let access_token = token.access_token().secret().to_string();

        let discord = DiscordApiClient::new(self.http_client, self.discord_api_url, &access_token);

        let user = discord.fetch_current_user().await?;
        let memberships = discord.fetch_current_user_guilds().await?;
        let member_of = memberships.len();
        let guilds = filter_administered(memberships);

        tracing::debug!(
            "User {} administers {} of {} guilds",
            user.id,
            guilds.len(),
            member_of
        );

        Ok(LoginOutcome {
            user: user.into_dto(),
            access_token,
            guilds,
        })
    }
}
