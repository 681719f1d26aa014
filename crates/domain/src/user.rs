//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! | 型 | 対応テーブル / カラム |
//! |---|---|
//! | [`User`] | `users` |
//! | [`Email`] | `users.email`（一意） |
//! | [`PasswordHash`] | `users.password`（ハッシュ済みの値のみ） |
//!
//! ## 関連
//!
//! - プロフィールと 1:1（ユーザー削除でプロフィールも削除）
//! - 注文と 1:N（ユーザー削除で注文の `user_id` は NULL になる）
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use shopmall_domain::user::{Email, NewUser, PasswordHash, UserId};
//!
//! let new_user = NewUser {
//!     id:            UserId::new(),
//!     email:         Email::new("user@example.com")?,
//!     password_hash: PasswordHash::new("$argon2id$v=19$...")?,
//!     is_active:     true,
//!     is_superuser:  false,
//! };
//! assert_eq!(new_user.email.as_str(), "user@example.com");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, value_objects::Timestamps};

define_uuid_id! {
    /// ユーザー ID
    pub struct UserId;
}

/// メールアドレスの最大長（`users.email VARCHAR(255)`）
const EMAIL_MAX_LENGTH: usize = 255;

/// メールアドレス（値オブジェクト）
///
/// `local@domain` の形式のみ検証する。
/// 一意性は DB の `ix_users_email` で保証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `@` の前後が空でない
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.chars().count() > EMAIL_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "メールアドレスは {EMAIL_MAX_LENGTH} 文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

define_bounded_string! {
    /// パスワードハッシュ
    ///
    /// 平文パスワードは扱わない。ハッシュ化は呼び出し側の責務。
    pub struct PasswordHash {
        label: "パスワードハッシュ",
        max_length: 255,
        secret: true,
    }
}

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `email` は全ユーザーで一意
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    email:         Email,
    password_hash: PasswordHash,
    is_active:     bool,
    is_superuser:  bool,
    last_login:    Option<DateTime<Utc>>,
    timestamps:    Timestamps,
}

/// ユーザーの新規作成パラメータ
///
/// `last_login` とタイムスタンプは DB の既定値に任せる。
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id:            UserId,
    pub email:         Email,
    pub password_hash: PasswordHash,
    pub is_active:     bool,
    pub is_superuser:  bool,
}

/// ユーザーの DB 復元パラメータ
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id:            UserId,
    pub email:         Email,
    pub password_hash: PasswordHash,
    pub is_active:     bool,
    pub is_superuser:  bool,
    pub last_login:    Option<DateTime<Utc>>,
    pub timestamps:    Timestamps,
}

impl User {
    /// 既存のデータからユーザーを復元する
    pub fn from_db(record: UserRecord) -> Self {
        Self {
            id:            record.id,
            email:         record.email,
            password_hash: record.password_hash,
            is_active:     record.is_active,
            is_superuser:  record.is_superuser,
            last_login:    record.last_login,
            timestamps:    record.timestamps,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    /// テスト用の固定タイムスタンプ
    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    // Email のテスト

    #[test]
    fn test_メールアドレスは正常な形式を受け入れる() {
        assert!(Email::new("user@example.com").is_ok());
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("no-at-sign", "@記号なし")]
    #[case("@example.com", "ローカル部分が空")]
    #[case("user@", "ドメイン部分が空")]
    #[case(&format!("{}@example.com", "a".repeat(250)), "255文字超過")]
    fn test_メールアドレスは不正な形式を拒否する(
        #[case] input: &str,
        #[case] _reason: &str,
    ) {
        assert!(Email::new(input).is_err());
    }

    // PasswordHash のテスト

    #[test]
    fn test_パスワードハッシュのdebug出力はマスクされる() {
        let hash = PasswordHash::new("$argon2id$v=19$secret").unwrap();

        assert_eq!(format!("{hash:?}"), r#"PasswordHash("[REDACTED]")"#);
    }

    // User のテスト

    #[rstest]
    fn test_from_dbでユーザーを復元できる(now: DateTime<Utc>) {
        let id = UserId::new();

        let user = User::from_db(UserRecord {
            id,
            email: Email::new("user@example.com").unwrap(),
            password_hash: PasswordHash::new("hashed").unwrap(),
            is_active: true,
            is_superuser: false,
            last_login: Some(now),
            timestamps: Timestamps::new(now, now),
        });

        assert_eq!(user.id(), &id);
        assert_eq!(user.email().as_str(), "user@example.com");
        assert!(user.is_active());
        assert!(!user.is_superuser());
        assert_eq!(user.last_login(), Some(now));
        assert_eq!(user.created_at(), now);
    }

    #[test]
    fn test_ユーザーidはuuid_v7で生成される() {
        let id = UserId::new();

        assert_eq!(id.as_uuid().get_version_num(), 7);
    }
}
