//! # Shopmall ドメイン層
//!
//! ショッピングモールの永続データモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子と DB が付与するタイムスタンプを持つ
//!   （User, Profile, Product, Inventory, Order, OrderItem）
//! - **共通フィールドは合成で共有**: ID は `define_uuid_id!` マクロ、
//!   タイムスタンプは [`Timestamps`] 値として各エンティティに埋め込む
//! - **値オブジェクト**: 生成時に検証する不変オブジェクト（例: Email, Money）
//! - **ドメインエラー**: 検証失敗を表現するエラー型
//!
//! ビジネスロジック（注文確定、在庫引当など）は持たない。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`value_objects`] - 複数エンティティで共有する値オブジェクト
//! - [`user`] / [`profile`] - ユーザーとプロフィール（1:1）
//! - [`product`] / [`inventory`] - 商品と在庫（1:1）
//! - [`order`] - 注文と注文明細（1:N）

#[macro_use]
mod macros;

pub mod error;
pub mod inventory;
pub mod order;
pub mod product;
pub mod profile;
pub mod user;
pub mod value_objects;

pub use error::DomainError;
pub use value_objects::{Money, Timestamps};
