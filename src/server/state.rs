//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into each handler through Axum's
//! state extraction. Every field is a cheap-to-clone handle:
//! - `reqwest::Client` uses an `Arc` internally
//! - `OAuth2Client` is designed to be cloned
//! - `DocumentStore` wraps a connection pool or an HTTP client

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};

use crate::server::{data::store::DocumentStore, service::identity::IdentityProvider};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// HTTP client for Discord, Firestore and Identity Toolkit requests.
    ///
    /// Configured without redirects, as required for the OAuth2 token exchange.
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// Where guild settings documents are read from and written to.
    pub store: DocumentStore,

    /// Source of backing-store identities for new sessions.
    pub identity_provider: IdentityProvider,

    /// Pre-issued backing-store token exchanged instead of anonymous sign-in.
    pub initial_auth_token: Option<String>,

    /// Discord application ID, embedded in bot invite links.
    pub discord_client_id: String,

    /// Base URL of the Discord REST API.
    pub discord_api_url: String,
}
