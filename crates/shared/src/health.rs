//! # ヘルスチェック共通型
//!
//! API サーバーと周辺ツールで共有するヘルスチェックのレスポンス型。
//!
//! - [`HealthResponse`]: Liveness Check（プロセスが応答できるか）
//! - [`DbConnectionResponse`]: DB 接続確認（`GET /test-db/`）

use serde::{Deserialize, Serialize};

/// DB 接続成功時の `status` 値
pub const DB_CONNECTION_OK: &str = "✅ Database Connection Successful!";

/// DB 接続失敗時の `status` 値
pub const DB_CONNECTION_FAILED: &str = "❌ Database Connection Failed";

/// ヘルスチェックレスポンス
///
/// `status` はサービスの稼働状態、`version` は Cargo.toml のバージョンを示す。
///
/// ## 使用例
///
/// ```
/// use shopmall_shared::HealthResponse;
///
/// let response = HealthResponse {
///     status:  "healthy".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` または `"unhealthy"`）
    pub status:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version: String,
}

/// DB 接続確認レスポンス
///
/// 成功時は `postgres_version`、失敗時は `error` のどちらか一方だけを持つ。
/// 失敗も HTTP 200 のボディとして返すため、呼び出し側は `status` か
/// [`is_ok`](Self::is_ok) で判定する。
///
/// ```
/// use shopmall_shared::DbConnectionResponse;
///
/// let ok = DbConnectionResponse::succeeded("PostgreSQL 16.2");
/// assert!(ok.is_ok());
///
/// let ng = DbConnectionResponse::failed("connection refused");
/// assert!(!ng.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DbConnectionResponse {
    /// 人間が読める成否マーカー
    pub status:           String,
    /// `SELECT version()` の結果（成功時のみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres_version: Option<String>,
    /// エラー内容（失敗時のみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:            Option<String>,
}

impl DbConnectionResponse {
    /// 接続成功レスポンスを作成する
    pub fn succeeded(postgres_version: impl Into<String>) -> Self {
        Self {
            status:           DB_CONNECTION_OK.to_string(),
            postgres_version: Some(postgres_version.into()),
            error:            None,
        }
    }

    /// 接続失敗レスポンスを作成する
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status:           DB_CONNECTION_FAILED.to_string(),
            postgres_version: None,
            error:            Some(error.into()),
        }
    }

    /// 接続に成功したか
    pub fn is_ok(&self) -> bool {
        self.postgres_version.is_some()
    }
}
