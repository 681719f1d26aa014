//! # Shopmall API サーバー
//!
//! ショッピングモール API のエントリーポイント。
//!
//! ## 起動手順
//!
//! 1. `.env` を読み込む（実環境の値が優先）
//! 2. 設定を読み込む（必須値が欠けていれば即座に終了）
//! 3. トレーシングを初期化する
//! 4. 接続プールとセッションプロバイダを作成する（遅延接続）
//! 5. ルーターを構築してサーバーを起動する
//! 6. Ctrl-C / SIGTERM で停止し、プールを閉じる
//!
//! スキーマの作成とマイグレーションは行わない。`shopmall-migrate` で別途適用する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `SECRET_KEY` | **Yes** | 署名用の秘密鍵 |
//! | `PROJECT_NAME` | No | OpenAPI のタイトル（デフォルト: `Shopping Mall API`） |
//! | `DB_POOL_SIZE` | No | 常駐接続数（デフォルト: `5`） |
//! | `DB_MAX_OVERFLOW` | No | 一時的に超過できる接続数（デフォルト: `10`） |
//! | `SQL_DEBUG` | No | 実行 SQL をログに出す（デフォルト: `false`） |
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `8000`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,shopmall=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... SECRET_KEY=... cargo run -p shopmall-api --bin shopmall-api
//! ```

use std::sync::Arc;

use anyhow::Context as _;
use shopmall_api::{Settings, build_app};
use shopmall_infra::{PgSessionProvider, SessionProvider, db};
use shopmall_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // 設定読み込み（SQL_DEBUG がログフィルタに影響するため、トレーシングより先に読む）
    let settings = Arc::new(Settings::from_env().context("設定の読み込みに失敗しました")?);

    let tracing_config = TracingConfig::from_env("shopmall-api").with_sql_debug(settings.sql_debug());
    init_tracing(&tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "shopmall-api").entered();

    tracing::debug!(?settings, "設定を読み込みました");

    // データベース接続プールを作成（接続は最初の利用時に張る）
    let pool = db::create_pool(settings.database_url(), &settings.pool_config())
        .context("接続プールの作成に失敗しました")?;
    let provider: Arc<dyn SessionProvider> = Arc::new(PgSessionProvider::new(pool.clone()));

    let app = build_app(&settings, provider);

    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{addr} にバインドできませんでした"))?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("API サーバーを停止しました");

    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("停止シグナルを受信しました");
}
