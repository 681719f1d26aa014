//! # OrderRepository
//!
//! 注文の永続化を担当するリポジトリ。
//!
//! 合計金額の非負条件は `check_positive_total` が保証する。
//! ユーザー削除後の注文は `user_id` が NULL のまま残る。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shopmall_domain::{
    Money,
    Timestamps,
    order::{NewOrder, Order, OrderId, OrderRecord, ShippingAddress, TrackingNumber},
    user::UserId,
    value_objects::{OrderStatus, PaymentStatus},
};
use uuid::Uuid;

use crate::{db::DbSession, error::InfraError};

/// 注文リポジトリトレイト
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, session: &mut DbSession, order: &NewOrder) -> Result<Order, InfraError>;

    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &OrderId,
    ) -> Result<Option<Order>, InfraError>;

    /// ユーザーの注文を作成日時の降順で取得
    async fn find_by_user(
        &self,
        session: &mut DbSession,
        user_id: &UserId,
    ) -> Result<Vec<Order>, InfraError>;

    /// 注文を削除する（注文明細は連鎖削除される）
    async fn delete(&self, session: &mut DbSession, id: &OrderId) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id:               Uuid,
    user_id:          Option<Uuid>,
    total_amount:     Decimal,
    status:           String,
    payment_status:   String,
    shipping_address: Option<String>,
    tracking_number:  Option<String>,
    created_at:       DateTime<Utc>,
    updated_at:       DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = InfraError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let invalid = |e: shopmall_domain::DomainError| InfraError::unexpected(e.to_string());

        Ok(Order::from_db(OrderRecord {
            id:               OrderId::from_uuid(row.id),
            user_id:          row.user_id.map(UserId::from_uuid),
            total_amount:     Money::new(row.total_amount).map_err(invalid)?,
            status:           OrderStatus::new(row.status).map_err(invalid)?,
            payment_status:   PaymentStatus::new(row.payment_status).map_err(invalid)?,
            shipping_address: row
                .shipping_address
                .map(ShippingAddress::new)
                .transpose()
                .map_err(invalid)?,
            tracking_number:  row
                .tracking_number
                .map(TrackingNumber::new)
                .transpose()
                .map_err(invalid)?,
            timestamps:       Timestamps::new(row.created_at, row.updated_at),
        }))
    }
}

/// PostgreSQL 実装の OrderRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresOrderRepository;

impl PostgresOrderRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(order_id = %order.id))]
    async fn insert(&self, session: &mut DbSession, order: &NewOrder) -> Result<Order, InfraError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (
                id, user_id, total_amount, status, payment_status,
                shipping_address, tracking_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, user_id, total_amount, status, payment_status,
                shipping_address, tracking_number, created_at, updated_at
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_ref().map(UserId::as_uuid))
        .bind(order.total_amount.as_decimal())
        .bind(order.status.as_str())
        .bind(order.payment_status.as_str())
        .bind(order.shipping_address.as_ref().map(ShippingAddress::as_str))
        .bind(order.tracking_number.as_ref().map(TrackingNumber::as_str))
        .fetch_one(&mut **session)
        .await?;

        Order::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &OrderId,
    ) -> Result<Option<Order>, InfraError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                id, user_id, total_amount, status, payment_status,
                shipping_address, tracking_number, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut **session)
        .await?;

        row.map(Order::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
    async fn find_by_user(
        &self,
        session: &mut DbSession,
        user_id: &UserId,
    ) -> Result<Vec<Order>, InfraError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                id, user_id, total_amount, status, payment_status,
                shipping_address, tracking_number, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&mut **session)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, session: &mut DbSession, id: &OrderId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut **session)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
