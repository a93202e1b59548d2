use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, guild::GuildListDto},
    server::{
        error::AppError, middleware::auth::AuthGuard, service::invite::invite_url,
        state::AppState,
    },
};

/// Tag for grouping guild endpoints in OpenAPI documentation
pub static GUILD_TAG: &str = "guild";

/// List administered guilds.
///
/// Returns the guilds captured at login where the caller holds the administrator
/// permission, plus the generic bot invite link.
///
/// # Access Control
/// - Logged in with Discord
#[utoipa::path(
    get,
    path = "/api/guilds",
    tag = GUILD_TAG,
    responses(
        (status = 200, description = "Administered guilds and invite link", body = GuildListDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_guilds(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth = AuthGuard::new(&session).require(&[]).await?;

    let dto = GuildListDto {
        guilds: auth.guilds,
        invite_url: invite_url(&state.discord_client_id, None)?,
    };

    Ok((StatusCode::OK, Json(dto)))
}
