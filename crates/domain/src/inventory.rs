//! # 在庫
//!
//! 商品に 1:1 で紐づく在庫数。商品削除時は DB の `ON DELETE CASCADE` で削除される。
//!
//! 数量の非負条件（`check_positive_quantity`）は DB が保証する。
//! アプリ側では検査せず、違反は `ConstraintViolation` としてインフラ層から返る。

use chrono::{DateTime, Utc};

use crate::{product::ProductId, value_objects::Timestamps};

define_uuid_id! {
    /// 在庫 ID
    pub struct InventoryId;
}

/// `low_stock_threshold` の既定値
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// 在庫エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    id:                  InventoryId,
    product_id:          Option<ProductId>,
    quantity:            i32,
    low_stock_threshold: Option<i32>,
    last_restock_date:   Option<DateTime<Utc>>,
    timestamps:          Timestamps,
}

/// 在庫の新規作成パラメータ
///
/// `last_restock_date` は DB の既定値（`now()`）に任せる。
#[derive(Debug, Clone)]
pub struct NewInventory {
    pub id:                  InventoryId,
    pub product_id:          Option<ProductId>,
    pub quantity:            i32,
    pub low_stock_threshold: Option<i32>,
}

/// 在庫の DB 復元パラメータ
#[derive(Debug, Clone)]
pub struct InventoryRecord {
    pub id:                  InventoryId,
    pub product_id:          Option<ProductId>,
    pub quantity:            i32,
    pub low_stock_threshold: Option<i32>,
    pub last_restock_date:   Option<DateTime<Utc>>,
    pub timestamps:          Timestamps,
}

impl Inventory {
    /// 既存のデータから復元する
    pub fn from_db(record: InventoryRecord) -> Self {
        Self {
            id:                  record.id,
            product_id:          record.product_id,
            quantity:            record.quantity,
            low_stock_threshold: record.low_stock_threshold,
            last_restock_date:   record.last_restock_date,
            timestamps:          record.timestamps,
        }
    }

    pub fn id(&self) -> &InventoryId {
        &self.id
    }

    pub fn product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn low_stock_threshold(&self) -> Option<i32> {
        self.low_stock_threshold
    }

    pub fn last_restock_date(&self) -> Option<DateTime<Utc>> {
        self.last_restock_date
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }

    /// 在庫が閾値以下か判定する
    ///
    /// `idx_inventory_low_stock` を使う検索条件
    /// `quantity <= low_stock_threshold` と同じ判定。
    /// 閾値が NULL の行は SQL の比較と同様に該当しない。
    pub fn is_low_stock(&self) -> bool {
        self.low_stock_threshold
            .is_some_and(|threshold| self.quantity <= threshold)
    }
}
