use thiserror::Error;

/// Failures reading or writing the backing document store and its identities.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Local SQLite document store failure.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Transport failure talking to the hosted store.
    #[error("Backing store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The hosted store rejected the request.
    #[error("Backing store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A stored document could not be decoded into guild settings.
    #[error("Invalid settings document for guild {guild_id}: {reason}")]
    InvalidDocument { guild_id: u64, reason: String },

    /// The configured store cannot perform the requested operation.
    #[error("Operation not supported by the {store} store: {operation}")]
    Unsupported {
        store: &'static str,
        operation: &'static str,
    },
}
