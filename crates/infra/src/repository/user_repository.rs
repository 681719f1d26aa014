//! # UserRepository
//!
//! ユーザーの永続化を担当するリポジトリ。
//!
//! メールアドレスの一意性は `ix_users_email` が保証する。重複した挿入は
//! `ConstraintViolation { kind: Unique, constraint: "ix_users_email" }` になる。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shopmall_domain::{
    Timestamps,
    user::{Email, NewUser, PasswordHash, User, UserId, UserRecord},
};
use uuid::Uuid;

use crate::{db::DbSession, error::InfraError};

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを挿入し、DB が設定した値を含めて返す
    async fn insert(&self, session: &mut DbSession, user: &NewUser) -> Result<User, InfraError>;

    /// ID でユーザーを検索
    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &UserId,
    ) -> Result<Option<User>, InfraError>;

    /// メールアドレスでユーザーを検索
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_email(
        &self,
        session: &mut DbSession,
        email: &Email,
    ) -> Result<Option<User>, InfraError>;

    /// 最終ログイン日時を現在時刻に更新
    ///
    /// 更新対象が存在しない場合は `false` を返す。
    async fn update_last_login(
        &self,
        session: &mut DbSession,
        id: &UserId,
    ) -> Result<bool, InfraError>;

    /// ユーザーを削除する
    ///
    /// プロフィールは連鎖削除され、注文の `user_id` は NULL になる。
    async fn delete(&self, session: &mut DbSession, id: &UserId) -> Result<bool, InfraError>;
}

/// DB の users テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct UserRow {
    id:           Uuid,
    email:        String,
    password:     String,
    is_active:    bool,
    is_superuser: bool,
    last_login:   Option<DateTime<Utc>>,
    created_at:   DateTime<Utc>,
    updated_at:   DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::from_db(UserRecord {
            id:            UserId::from_uuid(row.id),
            email:         Email::new(row.email)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            password_hash: PasswordHash::new(row.password)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            is_active:     row.is_active,
            is_superuser:  row.is_superuser,
            last_login:    row.last_login,
            timestamps:    Timestamps::new(row.created_at, row.updated_at),
        }))
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresUserRepository;

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %user.id))]
    async fn insert(&self, session: &mut DbSession, user: &NewUser) -> Result<User, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password, is_active, is_superuser)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id, email, password, is_active, is_superuser, last_login,
                created_at, updated_at
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.is_active)
        .bind(user.is_superuser)
        .fetch_one(&mut **session)
        .await?;

        User::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &UserId,
    ) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id, email, password, is_active, is_superuser, last_login,
                created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut **session)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(
        &self,
        session: &mut DbSession,
        email: &Email,
    ) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id, email, password, is_active, is_superuser, last_login,
                created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&mut **session)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_last_login(
        &self,
        session: &mut DbSession,
        id: &UserId,
    ) -> Result<bool, InfraError> {
        let result = sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut **session)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, session: &mut DbSession, id: &UserId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut **session)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
