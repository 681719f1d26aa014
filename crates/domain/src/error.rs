//! # ドメイン層エラー定義
//!
//! 値オブジェクトやエンティティの生成時に検出した入力不正を表現する。
//!
//! 制約違反のうち DB でしか検出できないもの（一意制約、外部キー）は
//! インフラ層の `InfraError` が扱う。ドメイン層は「DB に送る前に分かる」
//! 不正だけを担当する。
//!
//! ## 使用例
//!
//! ```rust
//! use shopmall_domain::DomainError;
//!
//! fn validate_name(name: &str) -> Result<(), DomainError> {
//!     if name.is_empty() {
//!         return Err(DomainError::Validation("商品名は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_name("").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がデータモデルの制約に違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 必須フィールドが空
    /// - 文字数制限の超過（カラム長）
    /// - 負の金額、0 以下の注文数量
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
