use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        settings::{GuildSettingsDto, SettingsViewDto, UpdateGuildSettingsDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AuthGuard, Permission},
            session::StoreSession,
        },
        service::{invite::invite_url, settings::SettingsService},
        state::AppState,
    },
};

/// Tag for grouping settings endpoints in OpenAPI documentation
pub static SETTINGS_TAG: &str = "settings";

/// Get a guild's settings view.
///
/// Loads the guild summary, its roles (highest first, without `@everyone`), its text
/// channels and the stored settings, falling back to defaults when nothing was saved yet.
///
/// # Access Control
/// - `GuildAdmin` - Caller administers the guild
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/settings",
    tag = SETTINGS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Settings view", body = SettingsViewDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User does not administer the guild", body = ErrorDto),
        (status = 502, description = "Discord request failed", body = ErrorDto),
        (status = 500, description = "Settings store failure", body = ErrorDto)
    ),
)]
pub async fn get_settings(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let auth = AuthGuard::new(&session)
        .require(&[Permission::GuildAdmin(guild_id)])
        .await?;
    let identity = StoreSession::new(&session).get_identity().await?;

    let service = SettingsService::new(&state.http_client, &state.discord_api_url, &state.store);
    let mut view = service
        .load_view(guild_id, &auth.access_token, identity.as_ref())
        .await?;
    view.invite_url = invite_url(&state.discord_client_id, Some(guild_id))?;

    Ok((StatusCode::OK, Json(view)))
}

/// Save a guild's settings.
///
/// Merge-writes the role selection, welcome channel and welcome message. Fields of the
/// stored document that the dashboard does not edit are kept.
///
/// # Access Control
/// - `GuildAdmin` - Caller administers the guild
#[utoipa::path(
    put,
    path = "/api/guilds/{guild_id}/settings",
    tag = SETTINGS_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    request_body = UpdateGuildSettingsDto,
    responses(
        (status = 200, description = "Saved settings", body = GuildSettingsDto),
        (status = 400, description = "More than 5 or duplicate auto roles", body = ErrorDto),
        (status = 401, description = "User not logged in", body = ErrorDto),
        (status = 403, description = "User does not administer the guild", body = ErrorDto),
        (status = 500, description = "Settings store failure", body = ErrorDto)
    ),
)]
pub async fn update_settings(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<UpdateGuildSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth = AuthGuard::new(&session)
        .require(&[Permission::GuildAdmin(guild_id)])
        .await?;
    let identity = StoreSession::new(&session).get_identity().await?;

    let service = SettingsService::new(&state.http_client, &state.discord_api_url, &state.store);
    let settings = service
        .save(guild_id, payload, auth.user.id, identity.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(settings)))
}
