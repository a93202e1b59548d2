use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The state token in the callback URL does not match the token stored in the
    /// session, indicating a forged or replayed callback.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Discord rejected the authorization code or the token endpoint was unreachable.
    #[error("Failed to exchange authorization code for an access token: {0}")]
    TokenExchange(String),

    /// No authenticated Discord identity in the session.
    #[error("No authenticated user in session")]
    UserNotInSession,

    /// The caller is logged in but does not administer the requested guild.
    #[error("User {user_id} does not administer guild {guild_id}")]
    GuildAccessDenied { user_id: u64, guild_id: u64 },
}

/// Converts authentication errors into HTTP responses.
///
/// - `CsrfValidationFailed` / `TokenExchange` → 400 Bad Request with a generic retry message
/// - `UserNotInSession` → 401 Unauthorized
/// - `GuildAccessDenied` → 403 Forbidden
///
/// Details are logged at debug level; client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::CsrfValidationFailed | Self::TokenExchange(_) => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
            Self::UserNotInSession => (StatusCode::UNAUTHORIZED, "You need to log in first."),
            Self::GuildAccessDenied { .. } => (
                StatusCode::FORBIDDEN,
                "You need the Administrator permission in this server to manage it.",
            ),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
