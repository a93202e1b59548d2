use sea_orm::DatabaseConnection;

use crate::server::{
    data::{firestore::FirestoreClient, settings::GuildSettingsRepository},
    error::store::StoreError,
    model::{
        session::StoreIdentity,
        settings::{GuildSettings, SettingsUpdate},
    },
};

/// The document store holding guild settings, selected at startup.
#[derive(Clone)]
pub enum DocumentStore {
    /// Documents in the application's SQLite database.
    Sqlite(DatabaseConnection),
    /// Documents in a hosted Firestore project, accessed with the session's identity token.
    Firestore(FirestoreClient),
}

impl DocumentStore {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Firestore(_) => "firestore",
        }
    }

    pub async fn find(
        &self,
        guild_id: u64,
        identity: Option<&StoreIdentity>,
    ) -> Result<Option<GuildSettings>, StoreError> {
        match self {
            Self::Sqlite(db) => GuildSettingsRepository::new(db).find(guild_id).await,
            Self::Firestore(client) => {
                let id_token = identity.and_then(|i| i.id_token.as_deref());
                match client.get(guild_id, id_token).await? {
                    Some(document) => Ok(Some(GuildSettings::from_document(guild_id, &document)?)),
                    None => Ok(None),
                }
            }
        }
    }

    /// Merge-writes an update, returning the stored result.
    pub async fn merge(
        &self,
        guild_id: u64,
        update: &SettingsUpdate,
        identity: Option<&StoreIdentity>,
    ) -> Result<GuildSettings, StoreError> {
        match self {
            Self::Sqlite(db) => GuildSettingsRepository::new(db).merge(guild_id, update).await,
            Self::Firestore(client) => {
                let id_token = identity.and_then(|i| i.id_token.as_deref());
                let document = client
                    .merge(guild_id, update.document_fields(), id_token)
                    .await?;
                GuildSettings::from_document(guild_id, &document)
            }
        }
    }
}
