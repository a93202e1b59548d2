use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures talking to the Discord REST API.
#[derive(Error, Debug)]
pub enum DiscordApiError {
    /// Transport failure or an undecodable response body.
    #[error("Discord request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Discord answered with a non-success status.
    #[error("Discord request to {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
}

/// Maps Discord failures onto the dashboard's own status codes.
///
/// - 401 from Discord → 401, the stored access token is no longer valid
/// - 403 / 404 from Discord → same status, the guild is not visible to the caller
/// - anything else → 502 Bad Gateway
impl IntoResponse for DiscordApiError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        let (status, message) = match &self {
            Self::Status { status: 401, .. } => (
                StatusCode::UNAUTHORIZED,
                "Your Discord session has expired, please log in again.",
            ),
            Self::Status { status: 403, .. } => (
                StatusCode::FORBIDDEN,
                "Discord denied access to this server.",
            ),
            Self::Status { status: 404, .. } => {
                (StatusCode::NOT_FOUND, "Discord could not find this server.")
            }
            _ => (
                StatusCode::BAD_GATEWAY,
                "Failed to reach Discord, please try again.",
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
