//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、親モジュールで re-export する
//! - `health`: ヘルスチェック、DB 接続確認

pub mod health;

pub use health::{health_check, test_db_connection};
