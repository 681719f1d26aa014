//! # InventoryRepository
//!
//! 在庫の永続化を担当するリポジトリ。
//!
//! 1 商品 1 在庫は `inventories_product_id_key`、数量の非負条件は
//! `check_positive_quantity` が保証する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shopmall_domain::{
    Timestamps,
    inventory::{DEFAULT_LOW_STOCK_THRESHOLD, Inventory, InventoryId, InventoryRecord, NewInventory},
    product::ProductId,
};
use uuid::Uuid;

use crate::{db::DbSession, error::InfraError};

/// 在庫リポジトリトレイト
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn insert(
        &self,
        session: &mut DbSession,
        inventory: &NewInventory,
    ) -> Result<Inventory, InfraError>;

    /// 商品の在庫を取得
    async fn find_by_product(
        &self,
        session: &mut DbSession,
        product_id: &ProductId,
    ) -> Result<Option<Inventory>, InfraError>;

    /// 在庫が閾値以下の在庫を数量の昇順で取得
    ///
    /// 条件は [`Inventory::is_low_stock`] と同じ。
    async fn find_low_stock(&self, session: &mut DbSession) -> Result<Vec<Inventory>, InfraError>;

    async fn delete(&self, session: &mut DbSession, id: &InventoryId) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct InventoryRow {
    id:                  Uuid,
    product_id:          Option<Uuid>,
    quantity:            i32,
    low_stock_threshold: Option<i32>,
    last_restock_date:   Option<DateTime<Utc>>,
    created_at:          DateTime<Utc>,
    updated_at:          DateTime<Utc>,
}

impl From<InventoryRow> for Inventory {
    fn from(row: InventoryRow) -> Self {
        Inventory::from_db(InventoryRecord {
            id:                  InventoryId::from_uuid(row.id),
            product_id:          row.product_id.map(ProductId::from_uuid),
            quantity:            row.quantity,
            low_stock_threshold: row.low_stock_threshold,
            last_restock_date:   row.last_restock_date,
            timestamps:          Timestamps::new(row.created_at, row.updated_at),
        })
    }
}

/// PostgreSQL 実装の InventoryRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresInventoryRepository;

impl PostgresInventoryRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(inventory_id = %inventory.id))]
    async fn insert(
        &self,
        session: &mut DbSession,
        inventory: &NewInventory,
    ) -> Result<Inventory, InfraError> {
        // 閾値の省略はカラムの既定値と同じ扱いにする
        let low_stock_threshold = inventory
            .low_stock_threshold
            .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            INSERT INTO inventories (id, product_id, quantity, low_stock_threshold)
            VALUES ($1, $2, $3, $4)
            RETURNING
                id, product_id, quantity, low_stock_threshold, last_restock_date,
                created_at, updated_at
            "#,
        )
        .bind(inventory.id.as_uuid())
        .bind(inventory.product_id.as_ref().map(ProductId::as_uuid))
        .bind(inventory.quantity)
        .bind(low_stock_threshold)
        .fetch_one(&mut **session)
        .await?;

        Ok(Inventory::from(row))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%product_id))]
    async fn find_by_product(
        &self,
        session: &mut DbSession,
        product_id: &ProductId,
    ) -> Result<Option<Inventory>, InfraError> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT
                id, product_id, quantity, low_stock_threshold, last_restock_date,
                created_at, updated_at
            FROM inventories
            WHERE product_id = $1
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&mut **session)
        .await?;

        Ok(row.map(Inventory::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_low_stock(&self, session: &mut DbSession) -> Result<Vec<Inventory>, InfraError> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT
                id, product_id, quantity, low_stock_threshold, last_restock_date,
                created_at, updated_at
            FROM inventories
            WHERE quantity <= low_stock_threshold
            ORDER BY quantity ASC, id ASC
            "#,
        )
        .fetch_all(&mut **session)
        .await?;

        Ok(rows.into_iter().map(Inventory::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, session: &mut DbSession, id: &InventoryId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM inventories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut **session)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
