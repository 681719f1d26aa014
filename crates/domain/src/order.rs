//! # 注文
//!
//! 注文と注文明細を定義する。
//!
//! | 型 | 対応テーブル | 関連 |
//! |---|---|---|
//! | [`Order`] | `orders` | ユーザー削除で `user_id` は NULL |
//! | [`OrderItem`] | `order_items` | 注文削除で明細も削除、商品削除で `product_id` は NULL |
//!
//! 注文確定や合計金額の再計算といった業務ルールは持たない。
//! `total_amount` は呼び出し側が決めた値をそのまま保存する。
//!
//! 明細の `price_at_time` は購入時点の価格のスナップショットで、
//! 商品価格の変更や商品削除の影響を受けない。

use chrono::{DateTime, Utc};

use crate::{
    product::ProductId,
    user::UserId,
    value_objects::{Money, OrderStatus, PaymentStatus, Timestamps},
};

define_uuid_id! {
    /// 注文 ID
    pub struct OrderId;
}

define_uuid_id! {
    /// 注文明細 ID
    pub struct OrderItemId;
}

define_bounded_string! {
    /// 配送先住所（`orders.shipping_address VARCHAR(255)`）
    pub struct ShippingAddress {
        label: "配送先住所",
        max_length: 255,
        secret: true,
    }
}

define_bounded_string! {
    /// 配送追跡番号（`orders.tracking_number VARCHAR(100)`）
    pub struct TrackingNumber {
        label: "追跡番号",
        max_length: 100,
    }
}

// =========================================================================
// Order
// =========================================================================

/// 注文エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id:               OrderId,
    user_id:          Option<UserId>,
    total_amount:     Money,
    status:           OrderStatus,
    payment_status:   PaymentStatus,
    shipping_address: Option<ShippingAddress>,
    tracking_number:  Option<TrackingNumber>,
    timestamps:       Timestamps,
}

/// 注文の新規作成パラメータ
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id:               OrderId,
    pub user_id:          Option<UserId>,
    pub total_amount:     Money,
    pub status:           OrderStatus,
    pub payment_status:   PaymentStatus,
    pub shipping_address: Option<ShippingAddress>,
    pub tracking_number:  Option<TrackingNumber>,
}

impl NewOrder {
    /// 未決済・未処理（どちらも `pending`）の注文パラメータを作成する
    pub fn pending(id: OrderId, user_id: UserId, total_amount: Money) -> Self {
        Self {
            id,
            user_id: Some(user_id),
            total_amount,
            status: OrderStatus::default(),
            payment_status: PaymentStatus::default(),
            shipping_address: None,
            tracking_number: None,
        }
    }
}

/// 注文の DB 復元パラメータ
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id:               OrderId,
    pub user_id:          Option<UserId>,
    pub total_amount:     Money,
    pub status:           OrderStatus,
    pub payment_status:   PaymentStatus,
    pub shipping_address: Option<ShippingAddress>,
    pub tracking_number:  Option<TrackingNumber>,
    pub timestamps:       Timestamps,
}

impl Order {
    /// 既存のデータから復元する
    pub fn from_db(record: OrderRecord) -> Self {
        Self {
            id:               record.id,
            user_id:          record.user_id,
            total_amount:     record.total_amount,
            status:           record.status,
            payment_status:   record.payment_status,
            shipping_address: record.shipping_address,
            tracking_number:  record.tracking_number,
            timestamps:       record.timestamps,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// 注文したユーザー（ユーザー削除後は `None`）
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn payment_status(&self) -> &PaymentStatus {
        &self.payment_status
    }

    pub fn shipping_address(&self) -> Option<&ShippingAddress> {
        self.shipping_address.as_ref()
    }

    pub fn tracking_number(&self) -> Option<&TrackingNumber> {
        self.tracking_number.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at
    }
}

// =========================================================================
// OrderItem
// =========================================================================

/// 注文明細エンティティ
///
/// 数量の正値条件（`quantity > 0`）は DB の CHECK 制約が保証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    id:            OrderItemId,
    order_id:      Option<OrderId>,
    product_id:    Option<ProductId>,
    quantity:      i32,
    price_at_time: Money,
    timestamps:    Timestamps,
}

/// 注文明細の新規作成パラメータ
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub id:            OrderItemId,
    pub order_id:      Option<OrderId>,
    pub product_id:    Option<ProductId>,
    pub quantity:      i32,
    pub price_at_time: Money,
}

/// 注文明細の DB 復元パラメータ
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub id:            OrderItemId,
    pub order_id:      Option<OrderId>,
    pub product_id:    Option<ProductId>,
    pub quantity:      i32,
    pub price_at_time: Money,
    pub timestamps:    Timestamps,
}

impl OrderItem {
    /// 既存のデータから復元する
    pub fn from_db(record: OrderItemRecord) -> Self {
        Self {
            id:            record.id,
            order_id:      record.order_id,
            product_id:    record.product_id,
            quantity:      record.quantity,
            price_at_time: record.price_at_time,
            timestamps:    record.timestamps,
        }
    }

    pub fn id(&self) -> &OrderItemId {
        &self.id
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    /// 購入した商品（商品削除後は `None`）
    pub fn product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn price_at_time(&self) -> Money {
        self.price_at_time
    }

    pub fn timestamps(&self) -> Timestamps {
        self.timestamps
    }
}
