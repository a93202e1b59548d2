use super::*;

/// Tests reading a guild that has never been configured.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = GuildSettingsRepository::new(db).find(123456789).await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests reading a stored document.
///
/// Verifies that role IDs and the channel ID are decoded from their string encoding
/// and the welcome message is returned verbatim.
///
/// Expected: Ok(Some) with decoded fields
#[tokio::test]
async fn decodes_stored_document() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_settings::GuildSettingsFactory::new(db)
        .guild_id("42")
        .auto_role_ids(["100", "200"])
        .welcome_channel_id("300")
        .welcome_message("Hello {user}")
        .build()
        .await?;

    let settings = GuildSettingsRepository::new(db).find(42).await?.unwrap();

    assert_eq!(settings.guild_id, 42);
    assert_eq!(settings.auto_role_ids, vec![100, 200]);
    assert_eq!(settings.welcome_channel_id, Some(300));
    assert_eq!(settings.welcome_message, "Hello {user}");
    assert!(settings.last_updated.is_some());

    Ok(())
}

/// Tests that an empty channel ID is read as no channel.
///
/// Expected: Ok(Some) with welcome_channel_id = None
#[tokio::test]
async fn empty_channel_id_means_none() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_settings::GuildSettingsFactory::new(db)
        .guild_id("42")
        .welcome_channel_id("")
        .build()
        .await?;

    let settings = GuildSettingsRepository::new(db).find(42).await?.unwrap();

    assert_eq!(settings.welcome_channel_id, None);

    Ok(())
}

/// Tests that documents are isolated per guild.
///
/// Expected: Ok(None) for a guild without its own document
#[tokio::test]
async fn does_not_return_other_guilds_document() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_settings::GuildSettingsFactory::new(db)
        .guild_id("1")
        .build()
        .await?;

    let result = GuildSettingsRepository::new(db).find(2).await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests reading a document whose role list holds a non-numeric ID.
///
/// Expected: Err(StoreError::InvalidDocument)
#[tokio::test]
async fn fails_for_malformed_role_ids() -> Result<(), StoreError> {
    let test = TestBuilder::new()
        .with_settings_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_settings::GuildSettingsFactory::new(db)
        .guild_id("42")
        .auto_role_ids(["everyone"])
        .build()
        .await?;

    let result = GuildSettingsRepository::new(db).find(42).await;

    assert!(matches!(
        result,
        Err(StoreError::InvalidDocument { guild_id: 42, .. })
    ));

    Ok(())
}
