//! # ProductRepository
//!
//! 商品の永続化を担当するリポジトリ。
//!
//! - **価格**: `NUMERIC(10,2)` を `rust_decimal::Decimal` で読み書きする
//! - **メタデータ**: `product_metadata JSONB` を `serde_json::Value` のまま扱う
//! - **カテゴリ検索**: `idx_product_category_price` に沿って価格の昇順で返す

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shopmall_domain::{
    Money,
    Timestamps,
    product::{Description, NewProduct, Product, ProductId, ProductRecord},
    value_objects::{Category, ProductName},
};
use uuid::Uuid;

use crate::{db::DbSession, error::InfraError};

/// 商品リポジトリトレイト
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(
        &self,
        session: &mut DbSession,
        product: &NewProduct,
    ) -> Result<Product, InfraError>;

    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &ProductId,
    ) -> Result<Option<Product>, InfraError>;

    /// カテゴリ内の商品を価格の昇順で取得
    async fn find_by_category(
        &self,
        session: &mut DbSession,
        category: &Category,
    ) -> Result<Vec<Product>, InfraError>;

    /// 商品を削除する
    ///
    /// 在庫は連鎖削除され、注文明細の `product_id` は NULL になる。
    async fn delete(&self, session: &mut DbSession, id: &ProductId) -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id:               Uuid,
    name:             String,
    description:      Option<String>,
    price:            Decimal,
    category:         String,
    product_metadata: Option<serde_json::Value>,
    is_available:     Option<bool>,
    created_at:       DateTime<Utc>,
    updated_at:       DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = InfraError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let invalid = |e: shopmall_domain::DomainError| InfraError::unexpected(e.to_string());

        Ok(Product::from_db(ProductRecord {
            id:           ProductId::from_uuid(row.id),
            name:         ProductName::new(row.name).map_err(invalid)?,
            description:  row
                .description
                .map(Description::new)
                .transpose()
                .map_err(invalid)?,
            price:        Money::new(row.price).map_err(invalid)?,
            category:     Category::new(row.category).map_err(invalid)?,
            metadata:     row.product_metadata,
            is_available: row.is_available,
            timestamps:   Timestamps::new(row.created_at, row.updated_at),
        }))
    }
}

/// PostgreSQL 実装の ProductRepository
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresProductRepository;

impl PostgresProductRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(product_id = %product.id))]
    async fn insert(
        &self,
        session: &mut DbSession,
        product: &NewProduct,
    ) -> Result<Product, InfraError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (
                id, name, description, price, category, product_metadata, is_available
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, name, description, price, category, product_metadata, is_available,
                created_at, updated_at
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(product.name.as_str())
        .bind(product.description.as_ref().map(Description::as_str))
        .bind(product.price.as_decimal())
        .bind(product.category.as_str())
        .bind(&product.metadata)
        .bind(product.is_available)
        .fetch_one(&mut **session)
        .await?;

        Product::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(
        &self,
        session: &mut DbSession,
        id: &ProductId,
    ) -> Result<Option<Product>, InfraError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id, name, description, price, category, product_metadata, is_available,
                created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut **session)
        .await?;

        row.map(Product::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%category))]
    async fn find_by_category(
        &self,
        session: &mut DbSession,
        category: &Category,
    ) -> Result<Vec<Product>, InfraError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id, name, description, price, category, product_metadata, is_available,
                created_at, updated_at
            FROM products
            WHERE category = $1
            ORDER BY price ASC, id ASC
            "#,
        )
        .bind(category.as_str())
        .fetch_all(&mut **session)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, session: &mut DbSession, id: &ProductId) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut **session)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
