//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use rust_decimal::Decimal;
use shopmall_domain::{
    Money,
    inventory::{Inventory, InventoryId, NewInventory},
    order::{NewOrder, NewOrderItem, Order, OrderId, OrderItem, OrderItemId},
    product::{NewProduct, Product, ProductId},
    profile::{NewProfile, Profile, ProfileId},
    user::{Email, NewUser, PasswordHash, User, UserId},
    value_objects::{Category, ProfileName, ProductName},
};
use shopmall_infra::{
    DbSession,
    repository::{
        InventoryRepository,
        OrderItemRepository,
        OrderRepository,
        PostgresInventoryRepository,
        PostgresOrderItemRepository,
        PostgresOrderRepository,
        PostgresProductRepository,
        PostgresProfileRepository,
        PostgresUserRepository,
        ProductRepository,
        ProfileRepository,
        UserRepository,
    },
};

// =============================================================================
// パラメータ生成ヘルパー
// =============================================================================

/// 小数 2 桁の金額を作成（`money(1980)` → 19.80）
pub fn money(cents: i64) -> Money {
    Money::new(Decimal::new(cents, 2)).unwrap()
}

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        id:            UserId::new(),
        email:         Email::new(email).unwrap(),
        password_hash: PasswordHash::new("$argon2id$v=19$m=65536,t=1,p=1$test").unwrap(),
        is_active:     true,
        is_superuser:  false,
    }
}

pub fn new_profile(user_id: &UserId, name: &str) -> NewProfile {
    NewProfile {
        id:         ProfileId::new(),
        user_id:    Some(*user_id),
        name:       ProfileName::new(name).unwrap(),
        phone:      None,
        address:    None,
        birth_date: None,
    }
}

pub fn new_product(name: &str, category: &str, price_cents: i64) -> NewProduct {
    NewProduct::new(
        ProductId::new(),
        ProductName::new(name).unwrap(),
        money(price_cents),
        Category::new(category).unwrap(),
    )
}

pub fn new_inventory(product_id: &ProductId, quantity: i32) -> NewInventory {
    NewInventory {
        id: InventoryId::new(),
        product_id: Some(*product_id),
        quantity,
        low_stock_threshold: None,
    }
}

pub fn new_order(user_id: &UserId, total_cents: i64) -> NewOrder {
    NewOrder::pending(OrderId::new(), *user_id, money(total_cents))
}

pub fn new_order_item(order_id: &OrderId, product_id: &ProductId, quantity: i32) -> NewOrderItem {
    NewOrderItem {
        id: OrderItemId::new(),
        order_id: Some(*order_id),
        product_id: Some(*product_id),
        quantity,
        price_at_time: money(1000),
    }
}

// =============================================================================
// DB セットアップヘルパー
// =============================================================================

pub async fn insert_user(session: &mut DbSession, email: &str) -> User {
    PostgresUserRepository::new()
        .insert(session, &new_user(email))
        .await
        .unwrap()
}

pub async fn insert_profile(session: &mut DbSession, user_id: &UserId) -> Profile {
    PostgresProfileRepository::new()
        .insert(session, &new_profile(user_id, "山田太郎"))
        .await
        .unwrap()
}

pub async fn insert_product(session: &mut DbSession, name: &str) -> Product {
    PostgresProductRepository::new()
        .insert(session, &new_product(name, "周辺機器", 500_000))
        .await
        .unwrap()
}

pub async fn insert_inventory(
    session: &mut DbSession,
    product_id: &ProductId,
    quantity: i32,
) -> Inventory {
    PostgresInventoryRepository::new()
        .insert(session, &new_inventory(product_id, quantity))
        .await
        .unwrap()
}

pub async fn insert_order(session: &mut DbSession, user_id: &UserId) -> Order {
    PostgresOrderRepository::new()
        .insert(session, &new_order(user_id, 300_000))
        .await
        .unwrap()
}

pub async fn insert_order_item(
    session: &mut DbSession,
    order_id: &OrderId,
    product_id: &ProductId,
) -> OrderItem {
    PostgresOrderItemRepository::new()
        .insert(session, &new_order_item(order_id, product_id, 1))
        .await
        .unwrap()
}
