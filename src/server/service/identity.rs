//! Backing-store identity bootstrap.
//!
//! Every browser session gets an identity in the backing store, separate from its Discord
//! login. The identity is only used to attribute writes and to authorize hosted document
//! requests, so a failed bootstrap is logged and the session carries on without one.

use dioxus_logger::tracing;
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::server::{
    error::{store::StoreError, AppError},
    middleware::session::StoreSession,
    model::session::StoreIdentity,
};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const LOCAL_UID_LENGTH: usize = 28;

/// Where backing-store identities come from.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityProvider {
    /// Random user IDs minted by the server, for the SQLite store.
    Local,
    /// Firebase Authentication via the Identity Toolkit REST API.
    Firebase { api_key: String },
}

/// Identity Toolkit sign-in response, shared by anonymous and custom-token sign-in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    id_token: String,
}

pub struct IdentityService<'a> {
    http_client: &'a reqwest::Client,
    provider: &'a IdentityProvider,
    initial_auth_token: Option<&'a str>,
}

impl<'a> IdentityService<'a> {
    pub fn new(
        http_client: &'a reqwest::Client,
        provider: &'a IdentityProvider,
        initial_auth_token: Option<&'a str>,
    ) -> Self {
        Self {
            http_client,
            provider,
            initial_auth_token,
        }
    }

    /// Makes sure the session has a backing-store identity.
    ///
    /// An identity already in the session is returned as is. Otherwise the configured
    /// token is exchanged, or an anonymous identity is created when no token is
    /// configured.
    ///
    /// # Returns
    /// - `Ok(Some(StoreIdentity))` - Existing or newly created identity
    /// - `Ok(None)` - Sign-in failed; the failure has been logged
    /// - `Err(AppError::SessionErr)` - Session could not be read or written
    pub async fn ensure(&self, session: &Session) -> Result<Option<StoreIdentity>, AppError> {
        let store_session = StoreSession::new(session);

        if let Some(identity) = store_session.get_identity().await? {
            return Ok(Some(identity));
        }

        match self.sign_in().await {
            Ok(identity) => {
                tracing::debug!("Established backing-store identity {}", identity.user_id);
                store_session.set_identity(identity.clone()).await?;
                Ok(Some(identity))
            }
            Err(e) => {
                tracing::warn!("Backing-store sign-in failed: {}", e);
                Ok(None)
            }
        }
    }

    async fn sign_in(&self) -> Result<StoreIdentity, StoreError> {
        match self.initial_auth_token {
            Some(token) => self.sign_in_with_custom_token(token).await,
            None => self.sign_in_anonymously().await,
        }
    }

    async fn sign_in_with_custom_token(&self, token: &str) -> Result<StoreIdentity, StoreError> {
        match self.provider {
            IdentityProvider::Local => Err(StoreError::Unsupported {
                store: "sqlite",
                operation: "custom token sign-in",
            }),
            IdentityProvider::Firebase { api_key } => {
                self.identity_toolkit(
                    "accounts:signInWithCustomToken",
                    api_key,
                    json!({ "token": token, "returnSecureToken": true }),
                )
                .await
            }
        }
    }

    async fn sign_in_anonymously(&self) -> Result<StoreIdentity, StoreError> {
        match self.provider {
            IdentityProvider::Local => Ok(StoreIdentity {
                user_id: generate_local_uid(),
                id_token: None,
            }),
            IdentityProvider::Firebase { api_key } => {
                self.identity_toolkit(
                    "accounts:signUp",
                    api_key,
                    json!({ "returnSecureToken": true }),
                )
                .await
            }
        }
    }

    async fn identity_toolkit(
        &self,
        method: &str,
        api_key: &str,
        body: serde_json::Value,
    ) -> Result<StoreIdentity, StoreError> {
        let response = self
            .http_client
            .post(format!("{}/{}", IDENTITY_TOOLKIT_URL, method))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let signed_in: SignInResponse = response.json().await?;

        Ok(StoreIdentity {
            user_id: signed_in.local_id,
            id_token: Some(signed_in.id_token),
        })
    }
}

/// Random alphanumeric user ID in the same shape Firebase uses for anonymous users.
fn generate_local_uid() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..LOCAL_UID_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
