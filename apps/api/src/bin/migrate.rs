//! # マイグレーションツール
//!
//! `migrations/` に置いた SQL をバイナリに埋め込み、`DATABASE_URL` の
//! データベースに適用する。適用済みのものはスキップされる。
//!
//! ## 使い方
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p shopmall-api --bin shopmall-migrate
//! ```

use anyhow::Context as _;
use shopmall_api::config::database_url_from_lookup;
use shopmall_infra::{PoolConfig, db};
use shopmall_shared::observability::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("shopmall-migrate"));

    let database_url = database_url_from_lookup(|key| std::env::var(key).ok())
        .context("DATABASE_URL の読み込みに失敗しました")?;

    let pool = db::create_pool(database_url.as_str(), &PoolConfig::default())
        .context("接続プールの作成に失敗しました")?;

    tracing::info!("マイグレーションを適用します");
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの適用に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    pool.close().await;

    Ok(())
}
