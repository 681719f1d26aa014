//! # 商品
//!
//! 商品エンティティを定義する。
//!
//! 価格は [`Money`] で表し、`check_positive_price`（`price >= 0`）と同じ条件を
//! 生成時に検査する。在庫とは 1:1、注文明細とは 1:N の関係を持つ。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rust_decimal::Decimal;
//! use shopmall_domain::{
//!     Money,
//!     product::{NewProduct, ProductId},
//!     value_objects::{Category, ProductName},
//! };
//!
//! let product = NewProduct::new(
//!     ProductId::new(),
//!     ProductName::new("メカニカルキーボード")?,
//!     Money::new(Decimal::new(1298000, 2))?,
//!     Category::new("周辺機器")?,
//! );
//! assert_eq!(product.is_available, Some(true));
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};

use crate::value_objects::{Category, Money, ProductName, Timestamps};

define_uuid_id! {
    /// 商品 ID
    pub struct ProductId;
}

define_bounded_string! {
    /// 商品説明（`products.description VARCHAR(1000)`）
    pub struct Description {
        label: "商品説明",
        max_length: 1000,
    }
}

/// 商品エンティティ
///
/// `metadata` は任意の JSON（`product_metadata JSONB`）。スキーマは持たない。
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id:           ProductId,
    name:         ProductName,
    description:  Option<Description>,
    price:        Money,
    category:     Category,
    metadata:     Option<serde_json::Value>,
    is_available: Option<bool>,
    timestamps:   Timestamps,
}

/// 商品の新規作成パラメータ
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id:           ProductId,
    pub name:         ProductName,
    pub description:  Option<Description>,
    pub price:        Money,
    pub category:     Category,
    pub metadata:     Option<serde_json::Value>,
    pub is_available: Option<bool>,
}

impl NewProduct {
    /// 必須項目だけで作成パラメータを組み立てる
    ///
    /// `is_available` はカラムの既定値と同じ `Some(true)` になる。
    pub fn new(id: ProductId, name: ProductName, price: Money, category: Category) -> Self {
        Self {
            id,
            name,
            description: None,
            price,
            category,
            metadata: None,
            is_available: Some(true),
        }
    }
}

/// 商品の DB 復元パラメータ
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub id:           ProductId,
    pub name:         ProductName,
    pub description:  Option<Description>,
    pub price:        Money,
    pub category:     Category,
    pub metadata:     Option<serde_json::Value>,
    pub is_available: Option<bool>,
    pub timestamps:   Timestamps,
}

impl Product {
    /// 既存のデータから復元する
    pub fn from_db(record: ProductRecord) -> Self {
        Self {
            id:           record.id,
            name:         record.name,
            description:  record.description,
            price:        record.price,
            category:     record.category,
            metadata:     record.metadata,
            is_available: record.is_available,
            timestamps:   record.timestamps,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    /// 販売可能フラグ
    ///
    /// カラムが NULL 許容のため、未設定は `None` のまま返す。
    pub fn is_available(&self) -> Option<bool> {
        self.is_available
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at
    }
}
