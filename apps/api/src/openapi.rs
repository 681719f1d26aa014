//! # OpenAPI 仕様定義
//!
//! utoipa を使用して API サーバーの OpenAPI 仕様を Rust の型から自動生成する。
//! タイトルは設定の `PROJECT_NAME` で上書きし、`GET /openapi.json` で配信する。

use std::sync::Arc;

use axum::{Json, extract::State};
use shopmall_shared::{DbConnectionResponse, HealthResponse};
use utoipa::OpenApi;

use crate::handler::health;

/// 仕様書のバージョン
pub const API_VERSION: &str = "1.0.0";

#[derive(OpenApi)]
#[openapi(
   info(
      title = "Shopping Mall API",
      version = "1.0.0",
      description = "ショッピングモール API のバックエンド"
   ),
   paths(
      health::health_check,
      health::test_db_connection,
   ),
   components(schemas(HealthResponse, DbConnectionResponse)),
   tags(
      (name = "health", description = "ヘルスチェック")
   )
)]
pub struct ApiDoc;

/// プロジェクト名をタイトルにした OpenAPI ドキュメントを生成する
pub fn api_doc(project_name: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = project_name.to_string();
    doc.info.version = API_VERSION.to_string();
    doc
}

/// OpenAPI ドキュメントを JSON で返す
pub async fn openapi_json(
    State(doc): State<Arc<utoipa::openapi::OpenApi>>,
) -> Json<utoipa::openapi::OpenApi> {
    Json(doc.as_ref().clone())
}
