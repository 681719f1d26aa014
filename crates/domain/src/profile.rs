//! # プロフィール
//!
//! ユーザーに 1:1 で紐づく個人情報。`profiles.user_id` の一意制約
//! （`profiles_user_id_key`）で「1 ユーザー 1 プロフィール」を保証し、
//! ユーザー削除時は DB の `ON DELETE CASCADE` で一緒に削除される。

use chrono::{DateTime, Utc};

use crate::{
    user::UserId,
    value_objects::{ProfileName, Timestamps},
};

define_uuid_id! {
    /// プロフィール ID
    pub struct ProfileId;
}

define_bounded_string! {
    /// 電話番号（`profiles.phone VARCHAR(20)`）
    ///
    /// 書式は検証しない。
    pub struct PhoneNumber {
        label: "電話番号",
        max_length: 20,
        secret: true,
    }
}

define_bounded_string! {
    /// 住所（`profiles.address VARCHAR(255)`）
    pub struct Address {
        label: "住所",
        max_length: 255,
        secret: true,
    }
}

/// プロフィールエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id:         ProfileId,
    user_id:    Option<UserId>,
    name:       ProfileName,
    phone:      Option<PhoneNumber>,
    address:    Option<Address>,
    birth_date: Option<DateTime<Utc>>,
    timestamps: Timestamps,
}

/// プロフィールの新規作成パラメータ
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id:         ProfileId,
    pub user_id:    Option<UserId>,
    pub name:       ProfileName,
    pub phone:      Option<PhoneNumber>,
    pub address:    Option<Address>,
    pub birth_date: Option<DateTime<Utc>>,
}

/// プロフィールの DB 復元パラメータ
#[derive(Debug, Clone)]
pub struct ProfileRecord {
    pub id:         ProfileId,
    pub user_id:    Option<UserId>,
    pub name:       ProfileName,
    pub phone:      Option<PhoneNumber>,
    pub address:    Option<Address>,
    pub birth_date: Option<DateTime<Utc>>,
    pub timestamps: Timestamps,
}

impl Profile {
    /// 既存のデータから復元する
    pub fn from_db(record: ProfileRecord) -> Self {
        Self {
            id:         record.id,
            user_id:    record.user_id,
            name:       record.name,
            phone:      record.phone,
            address:    record.address,
            birth_date: record.birth_date,
            timestamps: record.timestamps,
        }
    }

    pub fn id(&self) -> &ProfileId {
        &self.id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn name(&self) -> &ProfileName {
        &self.name
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn birth_date(&self) -> Option<DateTime<Utc>> {
        self.birth_date
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }
}
