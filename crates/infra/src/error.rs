//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `sqlx::Error` をラップし、PostgreSQL の制約違反は
//!   制約名付きの [`InfraErrorKind::ConstraintViolation`] に分類する
//! - **ドメインエラーとの分離**: インフラ固有のエラーを明示
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Database, ConstraintViolation 等）

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
///
/// ## パターンマッチ
///
/// 制約違反の判定には [`as_constraint_violation()`](InfraError::as_constraint_violation)
/// を使用する:
///
/// ```ignore
/// match error.as_constraint_violation() {
///     Some((ConstraintKind::Unique, Some("ix_users_email"))) => { /* メール重複 */ }
///     _ => { /* その他 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// 制約違反の種類
///
/// PostgreSQL の SQLSTATE クラス 23（integrity constraint violation）のうち、
/// スキーマで宣言している制約に対応するもの。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConstraintKind {
    /// 一意制約（23505）
    #[display("一意制約")]
    Unique,
    /// 外部キー制約（23503）
    #[display("外部キー制約")]
    ForeignKey,
    /// NOT NULL 制約（23502）
    #[display("NOT NULL 制約")]
    NotNull,
    /// CHECK 制約（23514）
    #[display("CHECK 制約")]
    Check,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// 接続拒否、認証失敗、プールのタイムアウト、SQL の実行失敗など。
    /// 制約違反はここに含めず [`ConstraintViolation`](Self::ConstraintViolation) に分類する。
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 制約違反
    ///
    /// DB がスキーマの制約で書き込みを拒否した。`constraint` は制約名
    /// （例: `check_positive_price`）。NOT NULL 違反など名前を持たない場合は `None`。
    #[error("制約違反（{kind}）: {}", .constraint.as_deref().unwrap_or("-"))]
    ConstraintViolation {
        kind:       ConstraintKind,
        constraint: Option<String>,
        #[source]
        source:     sqlx::Error,
    },

    /// 予期しないエラー
    ///
    /// DB から読み出した値がドメインの不変条件を満たさない場合など。
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// ConstraintViolation バリアントの場合、種類と制約名を返す
    pub fn as_constraint_violation(&self) -> Option<(ConstraintKind, Option<&str>)> {
        match &self.kind {
            InfraErrorKind::ConstraintViolation {
                kind, constraint, ..
            } => Some((*kind, constraint.as_deref())),
            _ => None,
        }
    }

    /// 接続プールからの取得がタイムアウトしたか
    pub fn is_pool_timeout(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Database(sqlx::Error::PoolTimedOut))
    }

    /// InfraError を分解して InfraErrorKind と SpanTrace を取り出す
    pub fn into_parts(self) -> (InfraErrorKind, SpanTrace) {
        (self.kind, self.span_trace)
    }

    // ===== Convenience constructors =====

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       classify(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

/// sqlx のエラーを種別に振り分ける
fn classify(source: sqlx::Error) -> InfraErrorKind {
    let violation = match &source {
        sqlx::Error::Database(db) => {
            let kind = match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                sqlx::error::ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                sqlx::error::ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                sqlx::error::ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                _ => None,
            };
            kind.map(|kind| (kind, db.constraint().map(str::to_string)))
        }
        _ => None,
    };

    match violation {
        Some((kind, constraint)) => InfraErrorKind::ConstraintViolation {
            kind,
            constraint,
            source,
        },
        None => InfraErrorKind::Database(source),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_from_sqlx_errorでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_repo", table = "products");
            let _enter = span.enter();

            let err: InfraError = sqlx::Error::RowNotFound.into();

            assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_repo"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_unexpectedでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_decode");
            let _enter = span.enter();

            let err = InfraError::unexpected("不正な金額");

            assert!(matches!(
                err.kind(),
                InfraErrorKind::Unexpected(msg) if msg == "不正な金額"
            ));
            assert!(format!("{}", err.span_trace()).contains("test_decode"));
        });
    }

    #[test]
    fn test_pool_timed_outはプールタイムアウトと判定される() {
        let err: InfraError = sqlx::Error::PoolTimedOut.into();

        assert!(err.is_pool_timeout());
        assert!(err.as_constraint_violation().is_none());
    }

    #[test]
    fn test_db以外のsqlxエラーは制約違反に分類しない() {
        let err: InfraError = sqlx::Error::RowNotFound.into();

        assert!(!err.is_pool_timeout());
        assert!(err.as_constraint_violation().is_none());
    }

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::unexpected("test");

        assert_eq!(format!("{err}"), "予期しないエラー: test");
    }

    #[test]
    fn test_sourceがinfra_error_kindに委譲する() {
        use std::error::Error;

        let err: InfraError = sqlx::Error::PoolTimedOut.into();

        assert!(err.source().is_some());
    }

    #[test]
    fn test_制約種別の表示名() {
        assert_eq!(ConstraintKind::Check.to_string(), "CHECK 制約");
        assert_eq!(ConstraintKind::Unique.to_string(), "一意制約");
    }
}
