//! # Observability 基盤
//!
//! トレーシング初期化とログ出力形式の設定を提供する。
//! API サーバーとマイグレーションツールで共通のログ初期化ロジックを集約し、
//! 環境変数 `LOG_FORMAT` による JSON / Pretty 出力の切り替えに対応する。
//!
//! `observability` feature 有効時は、リクエスト ID の生成とリクエストスパンの
//! 構築ヘルパーも提供する。

/// ログ出力形式
///
/// 環境変数 `LOG_FORMAT` で切り替える。
/// 値が未設定または不正な場合は [`Pretty`](LogFormat::Pretty) にフォールバックする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Pretty`](LogFormat::Pretty) にフォールバックし、
    /// stderr に警告を出力する（subscriber 初期化前に呼ばれるため）。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(val) => Self::parse(&val),
            Err(_) => Self::default(),
        }
    }
}

/// デフォルトのフィルタディレクティブ（`RUST_LOG` 未設定時）
pub const DEFAULT_DIRECTIVES: &str = "info,shopmall=debug";

/// SQL ログ有効時に追加するディレクティブ
///
/// sqlx は実行した SQL を `sqlx::query` ターゲットの debug レベルで出力する。
pub const SQL_DEBUG_DIRECTIVE: &str = "sqlx::query=debug";

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（起動ログに出力）
    pub service_name: String,
    /// ログ出力形式
    pub log_format:   LogFormat,
    /// 実行 SQL をログに出すか（`SQL_DEBUG`）
    pub sql_debug:    bool,
}

impl TracingConfig {
    /// 新しい設定を作成する
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            sql_debug: false,
        }
    }

    /// 環境変数から設定を読み取る
    ///
    /// `LOG_FORMAT` 環境変数で出力形式を決定する。
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }

    /// SQL ログの有効/無効を設定する
    pub fn with_sql_debug(mut self, sql_debug: bool) -> Self {
        self.sql_debug = sql_debug;
        self
    }

    /// `RUST_LOG` 未設定時に使うフィルタ文字列
    pub fn default_directives(&self) -> String {
        if self.sql_debug {
            format!("{DEFAULT_DIRECTIVES},{SQL_DEBUG_DIRECTIVE}")
        } else {
            DEFAULT_DIRECTIVES.to_string()
        }
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。
/// 未設定の場合は [`TracingConfig::default_directives`] を使う。
///
/// `ErrorLayer` を登録するため、インフラ層のエラーが捕捉する `SpanTrace` に
/// スパン情報が記録される。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_directives().into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}

/// UUID v7 でリクエスト ID を生成する `MakeRequestId` 実装
///
/// クライアントが `X-Request-Id` を付与していない場合のみ呼ばれる。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        http::HeaderValue::from_str(&id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// リクエストごとのスパンを作成する
///
/// `TraceLayer::make_span_with` に渡す。`X-Request-Id` ヘッダーの値を
/// `request_id` フィールドに載せ、リクエスト処理中の全ログに付与する。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
