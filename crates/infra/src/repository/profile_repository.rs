//! # ProfileRepository
//!
//! プロフィールの永続化を担当するリポジトリ。
//!
//! 1 ユーザー 1 プロフィールは `profiles_user_id_key` が保証する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shopmall_domain::{
    Timestamps,
    profile::{Address, NewProfile, PhoneNumber, Profile, ProfileId, ProfileRecord},
    user::UserId,
    value_objects::ProfileName,
};
use uuid::Uuid;

use crate::{db::DbSession, error::InfraError};

/// プロフィールリポジトリトレイト
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn insert(
        &self,
        session: &mut DbSession,
        profile: &NewProfile,
    ) -> Result<Profile, InfraError>;

    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &ProfileId,
    ) -> Result<Option<Profile>, InfraError>;

    /// ユーザーに紐づくプロフィールを取得
    async fn find_by_user(
        &self,
        session: &mut DbSession,
        user_id: &UserId,
    ) -> Result<Option<Profile>, InfraError>;

    async fn delete(&self, session: &mut DbSession, id: &ProfileId) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id:         Uuid,
    user_id:    Option<Uuid>,
    name:       String,
    phone:      Option<String>,
    address:    Option<String>,
    birth_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = InfraError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let invalid = |e: shopmall_domain::DomainError| InfraError::unexpected(e.to_string());

        Ok(Profile::from_db(ProfileRecord {
            id:         ProfileId::from_uuid(row.id),
            user_id:    row.user_id.map(UserId::from_uuid),
            name:       ProfileName::new(row.name).map_err(invalid)?,
            phone:      row.phone.map(PhoneNumber::new).transpose().map_err(invalid)?,
            address:    row.address.map(Address::new).transpose().map_err(invalid)?,
            birth_date: row.birth_date,
            timestamps: Timestamps::new(row.created_at, row.updated_at),
        }))
    }
}

/// PostgreSQL 実装の ProfileRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresProfileRepository;

impl PostgresProfileRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(profile_id = %profile.id))]
    async fn insert(
        &self,
        session: &mut DbSession,
        profile: &NewProfile,
    ) -> Result<Profile, InfraError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, user_id, name, phone, address, birth_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, user_id, name, phone, address, birth_date,
                created_at, updated_at
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(profile.user_id.as_ref().map(UserId::as_uuid))
        .bind(profile.name.as_str())
        .bind(profile.phone.as_ref().map(PhoneNumber::as_str))
        .bind(profile.address.as_ref().map(Address::as_str))
        .bind(profile.birth_date)
        .fetch_one(&mut **session)
        .await?;

        Profile::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &ProfileId,
    ) -> Result<Option<Profile>, InfraError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                id, user_id, name, phone, address, birth_date,
                created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut **session)
        .await?;

        row.map(Profile::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
    async fn find_by_user(
        &self,
        session: &mut DbSession,
        user_id: &UserId,
    ) -> Result<Option<Profile>, InfraError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                id, user_id, name, phone, address, birth_date,
                created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&mut **session)
        .await?;

        row.map(Profile::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, session: &mut DbSession, id: &ProfileId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut **session)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
