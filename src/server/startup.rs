use oauth2::{
    basic::BasicClient, AuthType, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl,
};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::{BackingStoreConfig, Config},
    data::{firestore::FirestoreClient, store::DocumentStore},
    error::{internal::InternalError, AppError},
    service::identity::IdentityProvider,
    state::{AppState, OAuth2Client},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the `guild_settings` table exists before the
/// first request.
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application's SQLite pool.
///
/// Sessions expire after 7 days of inactivity. The cookie is `SameSite=Lax` so it is
/// sent on the top-level redirect back from Discord, and only marked `Secure` when the
/// app is served over HTTPS.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer to attach to the API router
/// - `Err(AppError::SqlxErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store.migrate().await?;

    let secure = config.discord_redirect_url.starts_with("https://");

    Ok(SessionManagerLayer::new(session_store)
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(7))))
}

/// Builds the shared HTTP client.
///
/// Redirects are disabled; the OAuth2 token exchange must not follow them.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the Discord OAuth2 client from configuration.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorize, token and redirect URLs set
/// - `Err(AppError::InternalErr)` - One of the configured URLs does not parse
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(config.discord_auth_url.clone())
                .map_err(|e| invalid_url(&config.discord_auth_url, e))?,
        )
        .set_token_uri(
            TokenUrl::new(config.discord_token_url.clone())
                .map_err(|e| invalid_url(&config.discord_token_url, e))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(config.discord_redirect_url.clone())
                .map_err(|e| invalid_url(&config.discord_redirect_url, e))?,
        )
        // Discord reads client credentials from the form body
        .set_auth_type(AuthType::RequestBody);

    Ok(client)
}

fn invalid_url(value: &str, source: url::ParseError) -> InternalError {
    InternalError::InvalidUrl {
        value: value.to_string(),
        source,
    }
}

/// Selects the document store and matching identity provider for the configured backend.
pub fn setup_document_store(
    config: &Config,
    db: &DatabaseConnection,
    http_client: &reqwest::Client,
) -> (DocumentStore, IdentityProvider) {
    match &config.backing_store {
        BackingStoreConfig::Sqlite => (DocumentStore::Sqlite(db.clone()), IdentityProvider::Local),
        BackingStoreConfig::Firestore {
            project_id,
            api_key,
        } => (
            DocumentStore::Firestore(FirestoreClient::new(
                http_client.clone(),
                project_id.clone(),
                api_key.clone(),
                config.app_id.clone(),
            )
            .with_api_url(config.firestore_api_url.clone())),
            IdentityProvider::Firebase {
                api_key: api_key.clone(),
            },
        ),
    }
}

/// Assembles the shared application state.
pub fn build_state(
    config: &Config,
    db: &DatabaseConnection,
    http_client: reqwest::Client,
) -> Result<AppState, AppError> {
    let oauth_client = setup_oauth_client(config)?;
    let (store, identity_provider) = setup_document_store(config, db, &http_client);

    Ok(AppState {
        http_client,
        oauth_client,
        store,
        identity_provider,
        initial_auth_token: config.initial_auth_token.clone(),
        discord_client_id: config.discord_client_id.clone(),
        discord_api_url: config.discord_api_url.clone(),
    })
}
