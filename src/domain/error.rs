use crate::domain::model::ProductId;

/// ドメイン層のエラー型
/// カートのビジネスルール違反を表現する
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// 無効な数量（0以下、または表現できない大きさ）
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),
    /// 要求数量が在庫数を超えている
    #[error("Stock exceeded for product {product_id}: requested {requested}, available {available}")]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },
    /// カートに該当商品の明細がない
    #[error("Line item not found: {0}")]
    LineItemNotFound(ProductId),
    /// 同じ商品の明細が既に存在する
    #[error("Duplicate line item: {0}")]
    DuplicateLineItem(ProductId),
}
