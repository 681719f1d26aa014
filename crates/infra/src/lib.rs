//! # Shopmall インフラ層
//!
//! PostgreSQL との接続と永続化を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールとスコープ付きセッションの管理
//! - **スキーマ**: `migrations/` の DDL の埋め込みと適用
//! - **リポジトリ実装**: エンティティごとの挿入・取得・削除
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プール、[`DbSession`](db::DbSession)、[`SessionProvider`](db::SessionProvider)
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
pub mod repository;

pub use db::{DbSession, PgSessionProvider, PoolConfig, SessionProvider};
pub use error::{ConstraintKind, InfraError, InfraErrorKind};
