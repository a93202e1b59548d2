use super::*;

/// Tests the guard without any login in the session.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_anonymous_session() -> Result<(), AppError> {
    let mut test = TestContext::new();
    let session = test.session().await.unwrap();

    let result = AuthGuard::new(session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests the guard with a login and no extra permissions.
///
/// Expected: Ok with the stored user
#[tokio::test]
async fn accepts_logged_in_user() -> Result<(), AppError> {
    let mut test = TestContext::new();
    let session = test.session().await.unwrap();

    AuthSession::new(session).set_login(login(&[])).await?;

    let auth = AuthGuard::new(session).require(&[]).await?;

    assert_eq!(auth.user.id, 1001);

    Ok(())
}

/// Tests guild access for an administered guild.
///
/// Expected: Ok
#[tokio::test]
async fn allows_administered_guild() -> Result<(), AppError> {
    let mut test = TestContext::new();
    let session = test.session().await.unwrap();

    AuthSession::new(session).set_login(login(&[10, 20])).await?;

    let result = AuthGuard::new(session)
        .require(&[Permission::GuildAdmin(20)])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests guild access for a guild missing from the administered list.
///
/// Expected: Err(AuthError::GuildAccessDenied)
#[tokio::test]
async fn denies_other_guild() -> Result<(), AppError> {
    let mut test = TestContext::new();
    let session = test.session().await.unwrap();

    AuthSession::new(session).set_login(login(&[10])).await?;

    let result = AuthGuard::new(session)
        .require(&[Permission::GuildAdmin(30)])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::GuildAccessDenied {
            user_id: 1001,
            guild_id: 30
        }))
    ));

    Ok(())
}
