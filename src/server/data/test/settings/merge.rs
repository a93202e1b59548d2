use super::*;

/// Tests the first save for a guild.
///
/// Verifies that merge creates the document and returns the stored settings with
/// attribution.
///
/// Expected: Ok with one row created
#[tokio::test]
async fn creates_document_when_missing() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let settings = GuildSettingsRepository::new(db)
        .merge(42, &update(vec![1, 2]))
        .await?;

    assert_eq!(settings.auto_role_ids, vec![1, 2]);
    assert_eq!(settings.welcome_channel_id, Some(555));
    assert_eq!(settings.updated_by_discord_id, Some(80351110224678912));
    assert!(settings.last_updated.is_some());

    let count = entity::prelude::GuildSettings::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that fields the dashboard does not own survive a save.
///
/// Expected: Ok with extra fields still present in the stored document
#[tokio::test]
async fn preserves_unowned_fields() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_settings::GuildSettingsFactory::new(db)
        .guild_id("42")
        .auto_role_ids(["9"])
        .extra_field("premium", json!(true))
        .extra_field("join_stats", json!({"total": 120}))
        .build()
        .await?;

    GuildSettingsRepository::new(db)
        .merge(42, &update(vec![1]))
        .await?;

    let row = entity::prelude::GuildSettings::find_by_id("42".to_string())
        .one(db)
        .await?
        .unwrap();

    assert_eq!(row.document["premium"], json!(true));
    assert_eq!(row.document["join_stats"], json!({"total": 120}));
    assert_eq!(row.document["auto_role_ids"], json!(["1"]));

    Ok(())
}

/// Tests that a second save replaces the owned fields instead of appending.
///
/// Expected: Ok with the latest role list and a single row
#[tokio::test]
async fn overwrites_owned_fields() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    repo.merge(42, &update(vec![1, 2, 3])).await?;

    let mut second = update(vec![4]);
    second.welcome_channel_id = None;
    let settings = repo.merge(42, &second).await?;

    assert_eq!(settings.auto_role_ids, vec![4]);
    assert_eq!(settings.welcome_channel_id, None);

    let stored: GuildSettings = repo.find(42).await?.unwrap();
    assert_eq!(stored.auto_role_ids, vec![4]);
    assert_eq!(entity::prelude::GuildSettings::find().count(db).await?, 1);

    Ok(())
}

/// Tests that an anonymous save keeps an earlier store attribution.
///
/// Expected: Ok with updated_by_store_uid from the first save
#[tokio::test]
async fn keeps_previous_store_uid_when_absent() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    let mut first = update(vec![1]);
    first.updated_by_store_uid = Some("uid-1".to_string());
    repo.merge(42, &first).await?;

    let settings = repo.merge(42, &update(vec![2])).await?;

    assert_eq!(settings.updated_by_store_uid.as_deref(), Some("uid-1"));

    Ok(())
}
