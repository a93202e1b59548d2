use crate::{client::model::error::ApiError, model::user::SessionDto};

use super::helper::{get, parse_response, send_request};

/// Reads the session, creating the backing-store identity on first call.
///
/// A pending login error is returned once and then cleared by the server.
pub async fn get_session() -> Result<SessionDto, ApiError> {
    let response = send_request(get("/api/auth/session")).await?;
    parse_response(response).await
}
