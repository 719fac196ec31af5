use crate::domain::error::DomainError;
use crate::domain::port::{InventoryError, StorageError};
use crate::domain::serialization::SerializationError;
use std::fmt;

/// カート操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl CartOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartOperation::AddProduct => "add_product",
            CartOperation::RemoveProduct => "remove_product",
            CartOperation::UpdateProductAmount => "update_product_amount",
        }
    }

    /// 操作ごとの汎用的な失敗通知
    pub fn failure_notice(&self) -> CartNotice {
        match self {
            CartOperation::AddProduct => CartNotice::AddFailed,
            CartOperation::RemoveProduct => CartNotice::RemoveFailed,
            CartOperation::UpdateProductAmount => CartNotice::UpdateFailed,
        }
    }
}

/// ユーザーに表示する通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartNotice {
    StockUnavailable,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl CartNotice {
    pub fn message(&self) -> &'static str {
        match self {
            CartNotice::StockUnavailable => "requested quantity unavailable in stock",
            CartNotice::AddFailed => "error adding product",
            CartNotice::RemoveFailed => "error removing product",
            CartNotice::UpdateFailed => "error changing product quantity",
        }
    }
}

impl fmt::Display for CartNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// アプリケーション層のエラー型
/// カート操作の内部で発生するエラーをラップする
/// 公開操作の境界を越えることはなく、通知またはログに変換される
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// ドメインエラー（在庫不足、明細なし、無効な数量など）
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    /// 在庫サービスとの通信失敗
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),
    /// 永続化の失敗
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// スナップショットの生成失敗
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

impl CartError {
    /// エラーに対応する通知を決定する
    ///
    /// # Returns
    /// * `Some(CartNotice)` - 表示すべき通知
    /// * `None` - 通知せずに無視する（0以下の数量指定）
    pub fn notice(&self, operation: CartOperation) -> Option<CartNotice> {
        match self {
            CartError::Domain(DomainError::StockExceeded { .. }) => {
                Some(CartNotice::StockUnavailable)
            }
            CartError::Domain(DomainError::InvalidAmount(_))
                if operation == CartOperation::UpdateProductAmount =>
            {
                None
            }
            _ => Some(operation.failure_notice()),
        }
    }

    /// 業務上の拒否（在庫不足・明細なし・無効な数量）かどうか
    /// インフラ障害と区別してログレベルを決めるために使う
    pub fn is_rejection(&self) -> bool {
        matches!(self, CartError::Domain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ProductId;

    #[test]
    fn test_stock_exceeded_notice_for_every_operation() {
        let error = CartError::from(DomainError::StockExceeded {
            product_id: ProductId::new(1),
            requested: 2,
            available: 1,
        });
        assert_eq!(
            error.notice(CartOperation::AddProduct),
            Some(CartNotice::StockUnavailable)
        );
        assert_eq!(
            error.notice(CartOperation::UpdateProductAmount),
            Some(CartNotice::StockUnavailable)
        );
    }

    #[test]
    fn test_invalid_amount_on_update_is_silent() {
        let error = CartError::from(DomainError::InvalidAmount(0));
        assert_eq!(error.notice(CartOperation::UpdateProductAmount), None);
    }

    #[test]
    fn test_transport_failure_uses_generic_notice() {
        let error = CartError::from(InventoryError::Transport("timeout".to_string()));
        assert_eq!(error.notice(CartOperation::AddProduct), Some(CartNotice::AddFailed));
        assert_eq!(
            error.notice(CartOperation::UpdateProductAmount),
            Some(CartNotice::UpdateFailed)
        );
        assert!(!error.is_rejection());
    }

    #[test]
    fn test_not_found_on_remove() {
        let error = CartError::from(DomainError::LineItemNotFound(ProductId::new(3)));
        assert_eq!(
            error.notice(CartOperation::RemoveProduct),
            Some(CartNotice::RemoveFailed)
        );
        assert!(error.is_rejection());
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(
            CartNotice::StockUnavailable.to_string(),
            "requested quantity unavailable in stock"
        );
        assert_eq!(CartNotice::AddFailed.to_string(), "error adding product");
        assert_eq!(CartNotice::RemoveFailed.to_string(), "error removing product");
        assert_eq!(
            CartNotice::UpdateFailed.to_string(),
            "error changing product quantity"
        );
    }
}
