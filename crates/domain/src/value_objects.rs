//! # 値オブジェクト
//!
//! 複数のエンティティで共有する値オブジェクトを定義する。
//!
//! - [`Timestamps`]: 全テーブル共通の `created_at` / `updated_at`
//! - [`Money`]: `NUMERIC(10,2)` の金額（商品価格、注文合計、購入時価格）
//! - 長さ上限付き文字列: カラム長に対応する `VARCHAR(n)` の値
//!
//! ## 設計方針
//!
//! - **生成時に検証**: 不正な値はインスタンス化できない
//! - **DB の制約と二重化**: CHECK 制約と同じ条件をアプリ側でも検査する。
//!   DB 側の制約は最終防衛線として残す

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// 作成日時と更新日時
///
/// どちらも DB が設定する（`DEFAULT now()` と `set_updated_at()` トリガー）。
/// アプリケーションは読み取るだけで、値を決めない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timestamps {
    pub fn new(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at,
        }
    }
}

/// 金額（値オブジェクト）
///
/// `NUMERIC(10,2)` に格納できる 0 以上の固定小数点数。
///
/// # 不変条件
///
/// - 0 以上
/// - 小数部は 2 桁まで
/// - 整数部は 8 桁まで（最大 99,999,999.99）
///
/// ```rust
/// use rust_decimal::Decimal;
/// use shopmall_domain::Money;
///
/// let price = Money::new(Decimal::new(1980, 2)).unwrap();
/// assert_eq!(price.to_string(), "19.80");
///
/// assert!(Money::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// 小数部の最大桁数
    pub const SCALE: u32 = 2;

    /// 0 円
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// 金額を作成する
    ///
    /// 小数部が 2 桁未満の場合は 2 桁に揃える（`19.8` → `19.80`）。
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::Validation(format!(
                "金額は 0 以上である必要があります: {value}"
            )));
        }

        if value.normalize().scale() > Self::SCALE {
            return Err(DomainError::Validation(format!(
                "金額の小数部は {} 桁以内である必要があります: {value}",
                Self::SCALE
            )));
        }

        if value > Self::max_value() {
            return Err(DomainError::Validation(format!(
                "金額は {} 以下である必要があります: {value}",
                Self::max_value()
            )));
        }

        let mut value = value.abs();
        value.rescale(Self::SCALE);
        Ok(Self(value))
    }

    /// `NUMERIC(10,2)` の上限値
    pub fn max_value() -> Decimal {
        Decimal::new(9_999_999_999, 2)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

define_bounded_string! {
    /// 商品名（`products.name VARCHAR(200)`）
    pub struct ProductName {
        label: "商品名",
        max_length: 200,
    }
}

define_bounded_string! {
    /// 商品カテゴリ（`products.category VARCHAR(100)`）
    pub struct Category {
        label: "カテゴリ",
        max_length: 100,
    }
}

define_bounded_string! {
    /// プロフィール上の氏名（`profiles.name VARCHAR(100)`）
    pub struct ProfileName {
        label: "氏名",
        max_length: 100,
    }
}

/// 注文ステータスと支払いステータスの初期値
pub const PENDING: &str = "pending";

define_bounded_string! {
    /// 注文ステータス（`orders.status VARCHAR(50)`）
    ///
    /// 値の集合は固定しない。状態遷移のルールを持たないため、
    /// 任意の文字列をそのまま保存する。
    pub struct OrderStatus {
        label: "注文ステータス",
        max_length: 50,
    }
}

define_bounded_string! {
    /// 支払いステータス（`orders.payment_status VARCHAR(50)`）
    pub struct PaymentStatus {
        label: "支払いステータス",
        max_length: 50,
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self(PENDING.to_string())
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self(PENDING.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    // Money

    #[rstest]
    #[case(Decimal::ZERO, "0.00")]
    #[case(Decimal::new(198, 1), "19.80")]
    #[case(Decimal::new(1980, 2), "19.80")]
    #[case(Decimal::new(9_999_999_999, 2), "99999999.99")]
    fn test_金額は範囲内の値を2桁に揃えて受け入れる(
        #[case] input: Decimal,
        #[case] expected: &str,
    ) {
        let money = Money::new(input).unwrap();

        assert_eq!(money.to_string(), expected);
    }

    #[rstest]
    #[case(Decimal::new(-1, 0), "負の値")]
    #[case(Decimal::new(-1, 2), "負の小数")]
    #[case(Decimal::new(1001, 3), "小数部3桁")]
    #[case(Decimal::new(10_000_000_000, 2), "上限超過")]
    fn test_金額は制約外の値を拒否する(#[case] input: Decimal, #[case] _reason: &str) {
        assert!(Money::new(input).is_err());
    }

    #[test]
    fn test_末尾ゼロだけの3桁小数は受け入れる() {
        let money = Money::new(Decimal::new(1500, 3)).unwrap();

        assert_eq!(money.as_decimal(), Decimal::new(150, 2));
    }

    #[test]
    fn test_金額は文字列としてシリアライズされる() {
        let money = Money::new(Decimal::new(1980, 2)).unwrap();

        assert_eq!(serde_json::to_value(money).unwrap(), serde_json::json!("19.80"));
    }

    #[test]
    fn test_負の金額はデシリアライズできない() {
        let result: Result<Money, _> = serde_json::from_value(serde_json::json!("-1.00"));

        assert!(result.is_err());
    }

    // 長さ上限付き文字列

    #[test]
    fn test_商品名は前後の空白を除去する() {
        let name = ProductName::new("  Keyboard  ").unwrap();

        assert_eq!(name.as_str(), "Keyboard");
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("   ", "空白のみ")]
    fn test_商品名は空を拒否する(#[case] input: &str, #[case] _reason: &str) {
        let err = ProductName::new(input).unwrap_err();

        assert_eq!(err, DomainError::Validation("商品名は必須です".to_string()));
    }

    #[test]
    fn test_カテゴリは上限ちょうどを受け入れる() {
        assert!(Category::new("あ".repeat(Category::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_カテゴリは上限超過を拒否する() {
        assert!(Category::new("あ".repeat(Category::MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_ステータスの初期値はpending() {
        assert_eq!(OrderStatus::default().as_str(), "pending");
        assert_eq!(PaymentStatus::default().as_str(), "pending");
    }
}
