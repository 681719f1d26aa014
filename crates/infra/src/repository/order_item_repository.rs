//! # OrderItemRepository
//!
//! 注文明細の永続化を担当するリポジトリ。
//!
//! 数量は `check_positive_quantity`（`quantity > 0`）、購入時価格は
//! `check_positive_price` が検査する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shopmall_domain::{
    Money,
    Timestamps,
    order::{NewOrderItem, OrderId, OrderItem, OrderItemId, OrderItemRecord},
    product::ProductId,
};
use uuid::Uuid;

use crate::{db::DbSession, error::InfraError};

/// 注文明細リポジトリトレイト
#[async_trait]
pub trait OrderItemRepository: Send + Sync {
    async fn insert(
        &self,
        session: &mut DbSession,
        item: &NewOrderItem,
    ) -> Result<OrderItem, InfraError>;

    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &OrderItemId,
    ) -> Result<Option<OrderItem>, InfraError>;

    /// 注文に含まれる明細を ID 順で取得
    async fn find_by_order(
        &self,
        session: &mut DbSession,
        order_id: &OrderId,
    ) -> Result<Vec<OrderItem>, InfraError>;

    async fn delete(&self, session: &mut DbSession, id: &OrderItemId) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id:            Uuid,
    order_id:      Option<Uuid>,
    product_id:    Option<Uuid>,
    quantity:      i32,
    price_at_time: Decimal,
    created_at:    DateTime<Utc>,
    updated_at:    DateTime<Utc>,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = InfraError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        Ok(OrderItem::from_db(OrderItemRecord {
            id:            OrderItemId::from_uuid(row.id),
            order_id:      row.order_id.map(OrderId::from_uuid),
            product_id:    row.product_id.map(ProductId::from_uuid),
            quantity:      row.quantity,
            price_at_time: Money::new(row.price_at_time)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            timestamps:    Timestamps::new(row.created_at, row.updated_at),
        }))
    }
}

/// PostgreSQL 実装の OrderItemRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresOrderItemRepository;

impl PostgresOrderItemRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OrderItemRepository for PostgresOrderItemRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(order_item_id = %item.id))]
    async fn insert(
        &self,
        session: &mut DbSession,
        item: &NewOrderItem,
    ) -> Result<OrderItem, InfraError> {
        let row = sqlx::query_as::<_, OrderItemRow>(
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity, price_at_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id, order_id, product_id, quantity, price_at_time,
                created_at, updated_at
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.order_id.as_ref().map(OrderId::as_uuid))
        .bind(item.product_id.as_ref().map(ProductId::as_uuid))
        .bind(item.quantity)
        .bind(item.price_at_time.as_decimal())
        .fetch_one(&mut **session)
        .await?;

        OrderItem::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &OrderItemId,
    ) -> Result<Option<OrderItem>, InfraError> {
        let row = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT
                id, order_id, product_id, quantity, price_at_time,
                created_at, updated_at
            FROM order_items
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut **session)
        .await?;

        row.map(OrderItem::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%order_id))]
    async fn find_by_order(
        &self,
        session: &mut DbSession,
        order_id: &OrderId,
    ) -> Result<Vec<OrderItem>, InfraError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT
                id, order_id, product_id, quantity, price_at_time,
                created_at, updated_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_all(&mut **session)
        .await?;

        rows.into_iter().map(OrderItem::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, session: &mut DbSession, id: &OrderItemId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut **session)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
