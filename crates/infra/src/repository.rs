//! # リポジトリ実装
//!
//! エンティティごとの永続化操作を提供する。
//!
//! ## 設計方針
//!
//! - **セッション経由**: 全メソッドが `&mut DbSession` を受け取る。
//!   確定（コミット）は呼び出し側の責務
//! - **行の中間構造体**: `#[derive(sqlx::FromRow)]` の `XxxRow` で受け取り、
//!   `TryFrom` でドメインの `from_db` に渡す
//! - **テスタビリティ**: トレイト経由でモック可能な設計
//!
//! 読み取りはデータモデルの検証に必要なものだけを持ち、
//! 業務ルール（在庫引当、注文確定など）は持たない。

pub mod inventory_repository;
pub mod order_item_repository;
pub mod order_repository;
pub mod product_repository;
pub mod profile_repository;
pub mod user_repository;

pub use inventory_repository::{InventoryRepository, PostgresInventoryRepository};
pub use order_item_repository::{OrderItemRepository, PostgresOrderItemRepository};
pub use order_repository::{OrderRepository, PostgresOrderRepository};
pub use product_repository::{PostgresProductRepository, ProductRepository};
pub use profile_repository::{PostgresProfileRepository, ProfileRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
