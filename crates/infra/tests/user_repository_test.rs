//! UserRepository / ProfileRepository の統合テスト

mod common;

use pretty_assertions::assert_eq;
use shopmall_domain::{
    profile::{Address, NewProfile, PhoneNumber, ProfileId},
    user::{Email, UserId},
    value_objects::ProfileName,
};
use shopmall_infra::{
    PgSessionProvider,
    SessionProvider,
    repository::{
        PostgresProfileRepository,
        PostgresUserRepository,
        ProfileRepository,
        UserRepository,
    },
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_insertで既定値が設定される(pool: PgPool) {
    let provider = PgSessionProvider::new(pool);
    let mut session = provider.session().await.unwrap();
    let params = common::new_user("new@example.com");

    let user = PostgresUserRepository::new()
        .insert(&mut session, &params)
        .await
        .unwrap();

    assert_eq!(user.id(), &params.id);
    assert_eq!(user.email().as_str(), "new@example.com");
    assert!(user.is_active());
    assert!(!user.is_superuser());
    assert!(user.last_login().is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_emailでユーザーを取得できる(pool: PgPool) {
    let provider = PgSessionProvider::new(pool);
    let mut session = provider.session().await.unwrap();
    let inserted = common::insert_user(&mut session, "find@example.com").await;

    let found = PostgresUserRepository::new()
        .find_by_email(&mut session, &Email::new("find@example.com").unwrap())
        .await
        .unwrap();

    assert_eq!(found, Some(inserted));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しないidではnoneを返す(pool: PgPool) {
    let provider = PgSessionProvider::new(pool);
    let mut session = provider.session().await.unwrap();

    let found = PostgresUserRepository::new()
        .find_by_id(&mut session, &UserId::new())
        .await
        .unwrap();

    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しないユーザーのlast_login更新はfalseを返す(pool: PgPool) {
    let provider = PgSessionProvider::new(pool);
    let mut session = provider.session().await.unwrap();

    let updated = PostgresUserRepository::new()
        .update_last_login(&mut session, &UserId::new())
        .await
        .unwrap();

    assert!(!updated);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_プロフィールを全項目付きで保存して取得できる(pool: PgPool) {
    let provider = PgSessionProvider::new(pool);
    let mut session = provider.session().await.unwrap();
    let user = common::insert_user(&mut session, "profile@example.com").await;
    let repo = PostgresProfileRepository::new();
    let birth_date = chrono::DateTime::from_timestamp(631_152_000, 0).unwrap();

    let inserted = repo
        .insert(
            &mut session,
            &NewProfile {
                id:         ProfileId::new(),
                user_id:    Some(*user.id()),
                name:       ProfileName::new("佐藤花子").unwrap(),
                phone:      Some(PhoneNumber::new("090-1234-5678").unwrap()),
                address:    Some(Address::new("東京都千代田区1-1").unwrap()),
                birth_date: Some(birth_date),
            },
        )
        .await
        .unwrap();

    let found = repo
        .find_by_user(&mut session, user.id())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found, inserted);
    assert_eq!(found.phone().map(PhoneNumber::as_str), Some("090-1234-5678"));
    assert_eq!(found.birth_date(), Some(birth_date));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_プロフィールを削除してもユーザーは残る(pool: PgPool) {
    let provider = PgSessionProvider::new(pool);
    let mut session = provider.session().await.unwrap();
    let user = common::insert_user(&mut session, "keep@example.com").await;
    let profile = common::insert_profile(&mut session, user.id()).await;

    let deleted = PostgresProfileRepository::new()
        .delete(&mut session, profile.id())
        .await
        .unwrap();

    assert!(deleted);
    let user_after = PostgresUserRepository::new()
        .find_by_id(&mut session, user.id())
        .await
        .unwrap();
    assert!(user_after.is_some());
}
