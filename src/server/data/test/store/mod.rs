use crate::server::{
    data::store::DocumentStore,
    error::store::StoreError,
    model::{session::StoreIdentity, settings::SettingsUpdate},
};
use chrono::Utc;
use test_utils::builder::TestBuilder;

/// Tests the SQLite store through the store-agnostic interface.
///
/// The local store ignores the identity token, so saving with and without one behaves
/// the same.
///
/// Expected: Ok with the written settings read back
#[tokio::test]
async fn sqlite_store_round_trips_through_enum() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.clone().unwrap();

    let store = DocumentStore::Sqlite(db);
    let identity = StoreIdentity {
        user_id: "localUid".to_string(),
        id_token: None,
    };

    assert_eq!(store.name(), "sqlite");
    assert!(store.find(7, Some(&identity)).await?.is_none());

    store
        .merge(
            7,
            &SettingsUpdate {
                auto_role_ids: vec![10],
                welcome_channel_id: None,
                welcome_message: "Welcome {user}!".to_string(),
                last_updated: Utc::now(),
                updated_by_discord_id: 99,
                updated_by_store_uid: Some(identity.user_id.clone()),
            },
            Some(&identity),
        )
        .await?;

    let settings = store.find(7, None).await?.unwrap();
    assert_eq!(settings.auto_role_ids, vec![10]);
    assert_eq!(settings.updated_by_store_uid.as_deref(), Some("localUid"));

    Ok(())
}
