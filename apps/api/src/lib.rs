//! # Shopmall API サーバー
//!
//! ショッピングモール API のバックエンド。
//!
//! 現時点で公開するのは稼働確認用のエンドポイントのみで、データモデルは
//! スキーマとリポジトリ（`shopmall-infra`）として用意している。
//!
//! ## モジュール構成
//!
//! - [`config`]: 環境変数からの設定読み込み
//! - [`handler`]: HTTP ハンドラ
//! - [`openapi`]: OpenAPI 仕様
//! - [`app_builder`]: ルーターとミドルウェアの組み立て

pub mod app_builder;
pub mod config;
pub mod handler;
pub mod openapi;

pub use app_builder::build_app;
pub use config::{ConfigError, Settings};
