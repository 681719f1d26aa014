//! # アプリケーション構築
//!
//! State の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{Router, routing::get};
use shopmall_infra::SessionProvider;
use shopmall_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::Settings,
    handler::{health_check, test_db_connection},
    openapi::{api_doc, openapi_json},
};

/// ルーターを構築する
///
/// `db` はプロセスで 1 つのセッションプロバイダ。各リクエストが
/// 独立したセッションを取得する。
pub fn build_app(settings: &Settings, db: Arc<dyn SessionProvider>) -> Router {
    let doc = Arc::new(api_doc(settings.project_name()));

    // Request ID + TraceLayer により、すべての HTTP リクエストに request_id が付与されログに自動注入される
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/test-db/", get(test_db_connection))
                .route("/test-db", get(test_db_connection))
                .with_state(db),
        )
        .merge(
            Router::new()
                .route("/openapi.json", get(openapi_json))
                .with_state(doc),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
