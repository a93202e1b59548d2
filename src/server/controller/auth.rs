use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use dioxus_logger::tracing;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::SessionDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::session::{AuthSession, CsrfSession, OAuthFlowSession},
        model::session::LoginOutcome,
        service::{auth::AuthService, identity::IdentityService},
        state::AppState,
        util::parse::parse_u64_from_string,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize)]
pub struct LoginParams {
    /// Guild to open once the login completes.
    #[serde(default)]
    pub guild_id: Option<String>,
}

/// Query parameters Discord appends to the redirect URL.
///
/// `code` is absent when the user cancels on the consent screen; Discord sends `error`
/// instead.
#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Start the Discord login.
///
/// Stores a CSRF token and the optional preselected guild in the session, then redirects
/// to Discord's consent screen.
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    params(
        ("guild_id" = Option<String>, Query, description = "Guild to open after login")
    ),
    responses(
        (status = 307, description = "Redirect to Discord's authorize URL"),
        (status = 400, description = "Invalid guild ID", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(
        &state.http_client,
        &state.oauth_client,
        &state.discord_api_url,
    );

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().to_string())
        .await?;

    if let Some(guild_id) = params.guild_id.filter(|id| !id.is_empty()) {
        let guild_id = parse_u64_from_string(guild_id)
            .map_err(|_| AppError::BadRequest("Invalid guild ID".to_string()))?;
        OAuthFlowSession::new(&session)
            .set_pending_guild(guild_id)
            .await?;
    }

    Ok(Redirect::temporary(url.as_str()))
}

/// Complete the Discord login.
///
/// Never answers with an error status: a failed login clears the Discord identity,
/// records a message for the next session read and redirects to `/login`.
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(
        ("code" = Option<String>, Query, description = "Authorization code from Discord"),
        ("state" = Option<String>, Query, description = "CSRF state issued at login"),
        ("error" = Option<String>, Query, description = "Error reported by Discord")
    ),
    responses(
        (status = 303, description = "Redirect to the dashboard, or to /login on failure"),
        (status = 500, description = "Session store failure", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let result = complete_login(&state, &session, params).await;
    let target = finish_login(&session, result).await?;

    Ok(Redirect::to(&target))
}

/// Log out.
///
/// Clears the whole session, including the backing-store identity.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 303, description = "Redirect to /login")
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(Redirect::to("/login"))
}

/// Get the current session.
///
/// Bootstraps the backing-store identity when the session has none yet, and returns
/// (then forgets) the last login error.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current session state", body = SessionDto),
        (status = 500, description = "Session store failure", body = ErrorDto)
    ),
)]
pub async fn get_session(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let identity = IdentityService::new(
        &state.http_client,
        &state.identity_provider,
        state.initial_auth_token.as_deref(),
    )
    .ensure(&session)
    .await?;

    let auth = AuthSession::new(&session).get().await?;
    let auth_error = OAuthFlowSession::new(&session).take_auth_error().await?;

    let dto = SessionDto {
        is_authenticated: auth.is_some(),
        user: auth.map(|auth| auth.user),
        backing_store_user_id: identity.map(|identity| identity.user_id),
        auth_error,
    };

    Ok((StatusCode::OK, Json(dto)))
}

async fn complete_login(
    state: &AppState,
    session: &Session,
    params: CallbackParams,
) -> Result<LoginOutcome, AppError> {
    validate_csrf(session, params.state.as_deref()).await?;

    let Some(code) = params.code else {
        let reason = params
            .error
            .unwrap_or_else(|| "missing authorization code".to_string());
        return Err(AuthError::TokenExchange(reason).into());
    };

    AuthService::new(
        &state.http_client,
        &state.oauth_client,
        &state.discord_api_url,
    )
    .callback(code)
    .await
}

async fn validate_csrf(session: &Session, csrf_state: Option<&str>) -> Result<(), AppError> {
    let stored_state = CsrfSession::new(session).take_token().await?;

    match (stored_state, csrf_state) {
        (Some(stored), Some(received)) if stored == received => Ok(()),
        _ => Err(AuthError::CsrfValidationFailed.into()),
    }
}

/// Applies a callback result to the session and returns where to send the browser.
///
/// On success the login is stored and a preselected guild becomes `/?guild_id=ID`. On
/// failure the Discord identity is cleared, leaving the backing-store identity alone, and
/// the error is kept for the next `GET /api/auth/session`.
///
/// # Returns
/// - `Ok(String)` - Redirect target
/// - `Err(AppError::SessionErr)` - The session itself could not be updated
pub async fn finish_login(
    session: &Session,
    result: Result<LoginOutcome, AppError>,
) -> Result<String, AppError> {
    let auth_session = AuthSession::new(session);
    let flow_session = OAuthFlowSession::new(session);

    match result {
        Ok(outcome) => {
            tracing::info!(
                "User {} logged in with {} administered guilds",
                outcome.user.id,
                outcome.guilds.len()
            );

            auth_session.set_login(outcome).await?;
            flow_session.take_auth_error().await?;

            Ok(match flow_session.take_pending_guild().await? {
                Some(guild_id) => format!("/?guild_id={}", guild_id),
                None => "/".to_string(),
            })
        }
        Err(err) => {
            tracing::warn!("Discord login failed: {}", err);

            auth_session.clear_identity().await?;
            flow_session.take_pending_guild().await?;
            flow_session.set_auth_error(login_error_message(&err)).await?;

            Ok("/login".to_string())
        }
    }
}

fn login_error_message(err: &AppError) -> String {
    match err {
        AppError::AuthErr(AuthError::CsrfValidationFailed) => {
            "Your login link expired, please try again.".to_string()
        }
        AppError::AuthErr(AuthError::TokenExchange(_)) => {
            "Discord did not accept the login, please try again.".to_string()
        }
        AppError::DiscordErr(_) => {
            "Failed to load your Discord profile, please try again.".to_string()
        }
        _ => "Login failed, please try again.".to_string(),
    }
}
