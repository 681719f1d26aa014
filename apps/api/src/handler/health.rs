//! # ヘルスチェックハンドラ
//!
//! API サーバーの稼働状態を確認するためのエンドポイント。
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/test-db/` — DB 接続確認（`SELECT version()` を実行する）
//!
//! DB 接続確認は失敗しても 200 を返し、成否はボディの `status` で伝える。
//! レスポンス型は [`shopmall_shared::DbConnectionResponse`] を参照。

use std::{sync::Arc, time::Duration};

use axum::{Json, extract::State};
use shopmall_infra::{SessionProvider, db};
use shopmall_shared::{DbConnectionResponse, HealthResponse};

/// DB 接続確認のタイムアウト
pub const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// API サーバーのヘルスチェックエンドポイント
#[utoipa::path(
   get,
   path = "/health",
   tag = "health",
   responses(
      (status = 200, description = "サーバー稼働中", body = HealthResponse)
   )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// DB 接続確認エンドポイント
///
/// セッションを 1 つ取得して `SELECT version()` を実行する（タイムアウト: 5 秒）。
/// 接続拒否、認証失敗、プールのタイムアウト、クエリのタイムアウトはいずれも
/// 失敗レスポンスとして返し、エラーをハンドラの外に出さない。
#[utoipa::path(
   get,
   path = "/test-db/",
   tag = "health",
   responses(
      (status = 200, description = "DB 接続確認の結果（失敗時も 200）", body = DbConnectionResponse)
   )
)]
#[tracing::instrument(skip_all)]
pub async fn test_db_connection(
    State(provider): State<Arc<dyn SessionProvider>>,
) -> Json<DbConnectionResponse> {
    Json(check_database(provider.as_ref(), DB_CHECK_TIMEOUT).await)
}

/// セッション取得からバージョン取得までを `timeout` 以内に行う
async fn check_database(provider: &dyn SessionProvider, timeout: Duration) -> DbConnectionResponse {
    let check = async {
        let mut session = provider.session().await?;
        // 読み取りのみのためコミットせず、ドロップでロールバックする
        db::server_version(&mut session).await
    };

    match tokio::time::timeout(timeout, check).await {
        Ok(Ok(version)) => DbConnectionResponse::succeeded(version),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "db connection check failed");
            DbConnectionResponse::failed(e.to_string())
        }
        Err(_) => {
            tracing::warn!(timeout_secs = timeout.as_secs_f64(), "db connection check timed out");
            DbConnectionResponse::failed(format!(
                "タイムアウトしました（{} 秒）",
                timeout.as_secs_f64()
            ))
        }
    }
}
