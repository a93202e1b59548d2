//! Persistence layer for guild settings documents.
//!
//! `GuildSettingsRepository` stores documents in the application's SQLite database through
//! SeaORM, `FirestoreClient` stores them in a hosted Firestore project. `DocumentStore`
//! selects one of the two at startup and exposes the same read and merge-write operations
//! over either.

pub mod firestore;
pub mod settings;
pub mod store;

#[cfg(test)]
mod test;
