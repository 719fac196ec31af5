use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

use std::fmt;

/// 商品の一意識別子
/// 在庫サービスが採番する数値IDをそのまま保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// 数値からProductIdを作成
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// 文字列からProductIdを作成
    pub fn from_string(s: &str) -> Result<Self, std::num::ParseIntError> {
        let value = s.trim().parse::<u64>()?;
        Ok(Self(value))
    }

    /// 内部の数値を取得
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// カートに入れる数量を表す値オブジェクト
/// 常に1以上であることを保証する
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Amount(u32);

impl Amount {
    /// 数量1
    pub const ONE: Amount = Amount(1);

    /// 要求された数量から作成
    /// 0以下の数量は拒否する
    ///
    /// # Arguments
    /// * `requested` - 要求数量（負の値も受け付ける）
    ///
    /// # Returns
    /// * `Ok(Amount)` - 1以上の数量
    /// * `Err(DomainError::InvalidAmount)` - 0以下、または上限超過
    pub fn new(requested: i64) -> Result<Self, DomainError> {
        if requested <= 0 {
            return Err(DomainError::InvalidAmount(requested));
        }
        u32::try_from(requested)
            .map(Self)
            .map_err(|_| DomainError::InvalidAmount(requested))
    }

    /// 数量を取得
    pub fn value(&self) -> u32 {
        self.0
    }

    /// 1つ増やした数量を返す
    pub fn incremented(&self) -> Result<Amount, DomainError> {
        self.0
            .checked_add(1)
            .map(Amount)
            .ok_or(DomainError::InvalidAmount(i64::from(self.0) + 1))
    }
}

impl TryFrom<u32> for Amount {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Amount::new(i64::from(value))
    }
}

impl From<Amount> for u32 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 在庫数を表す値オブジェクト
/// 在庫サービスから操作のたびに取得する最新値
/// 在庫サービスが0や負の値を返すこともあるため符号付きで保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockQuantity(i64);

impl StockQuantity {
    /// 在庫数を作成
    pub fn new(quantity: i64) -> Self {
        Self(quantity)
    }

    /// 在庫数を取得
    pub fn value(&self) -> i64 {
        self.0
    }

    /// 指定された数量をまかなえるかチェック
    ///
    /// # Returns
    /// * `true` - 数量が在庫数以下
    /// * `false` - 在庫が不足している
    pub fn covers(&self, amount: Amount) -> bool {
        i64::from(amount.value()) <= self.0
    }
}

impl fmt::Display for StockQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
