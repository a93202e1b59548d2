use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        auth::{self, AUTH_TAG},
        guild::{self, GUILD_TAG},
        settings::{self, SETTINGS_TAG},
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Auto-Role Dashboard API"),
    tags(
        (name = AUTH_TAG, description = "Discord login and session"),
        (name = GUILD_TAG, description = "Administered guilds"),
        (name = SETTINGS_TAG, description = "Auto-role and welcome settings")
    )
)]
struct ApiDoc;

/// Builds the `/api` router and serves its OpenAPI document at `/api/docs`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_session))
        .routes(routes!(guild::get_guilds))
        .routes(routes!(settings::get_settings, settings::update_settings))
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
