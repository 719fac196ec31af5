use crate::domain::error::DomainError;
use crate::domain::model::{Amount, Product, ProductId, StockQuantity};
use serde::{Deserialize, Serialize};

/// カート明細
/// 商品属性と購入希望数量の組。商品IDが明細の同一性になる
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    product: Product,
    amount: Amount,
}

/// 明細の数量を表すキー。商品属性と同じ階層に並ぶため商品側では使えない
const AMOUNT_KEY: &str = "amount";

impl CartLineItem {
    /// 新しいカート明細を作成
    /// 商品属性に`amount`が含まれていても明細の数量が優先される
    pub fn new(product: Product, amount: Amount) -> Self {
        Self {
            product: product.without_attribute(AMOUNT_KEY),
            amount,
        }
    }

    /// 商品IDを取得
    pub fn product_id(&self) -> ProductId {
        self.product.id()
    }

    /// 商品を取得
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// 数量を取得
    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// カート
/// 明細の順序付きコレクション。並び順は最初に追加された順
///
/// 不変条件:
/// - 同じ商品IDの明細は1つまで
/// - 数量は常に1以上（`Amount`が保証する）
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Cart {
    line_items: Vec<CartLineItem>,
}

impl Cart {
    /// 空のカートを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 永続化データなどから取得した明細でカートを再構築
    /// 商品IDの重複があれば失敗する
    pub fn from_line_items(line_items: Vec<CartLineItem>) -> Result<Self, DomainError> {
        let mut cart = Self::new();
        for line_item in line_items {
            cart.append(line_item)?;
        }
        Ok(cart)
    }

    /// 明細のリストを取得
    pub fn line_items(&self) -> &[CartLineItem] {
        &self.line_items
    }

    /// 明細の数（商品の種類数）を取得
    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// 商品IDで明細を検索
    pub fn line_item(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.line_items
            .iter()
            .find(|line| line.product_id() == product_id)
    }

    /// 商品がカートに入っているか
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line_item(product_id).is_some()
    }

    /// 商品の数量を取得
    pub fn amount_of(&self, product_id: ProductId) -> Option<Amount> {
        self.line_item(product_id).map(CartLineItem::amount)
    }

    /// 明細を末尾に追加
    ///
    /// # Returns
    /// * `Ok(())` - 追加成功
    /// * `Err(DomainError::DuplicateLineItem)` - 同じ商品の明細が既にある
    pub fn append(&mut self, line_item: CartLineItem) -> Result<(), DomainError> {
        let product_id = line_item.product_id();
        if self.contains(product_id) {
            return Err(DomainError::DuplicateLineItem(product_id));
        }
        self.line_items.push(line_item);
        Ok(())
    }

    /// 既存明細の数量を1つ増やす
    ///
    /// # Arguments
    /// * `product_id` - 商品ID
    /// * `stock` - 直前に取得した在庫数
    ///
    /// # Returns
    /// * `Ok(Amount)` - 増加後の数量
    /// * `Err(DomainError::LineItemNotFound)` - 明細がない
    /// * `Err(DomainError::StockExceeded)` - 在庫不足（数量は変わらない）
    pub fn increment(
        &mut self,
        product_id: ProductId,
        stock: StockQuantity,
    ) -> Result<Amount, DomainError> {
        let line = self
            .line_items
            .iter_mut()
            .find(|line| line.product_id() == product_id)
            .ok_or(DomainError::LineItemNotFound(product_id))?;

        let requested = line.amount.incremented()?;
        if !stock.covers(requested) {
            return Err(DomainError::StockExceeded {
                product_id,
                requested: i64::from(requested.value()),
                available: stock.value(),
            });
        }
        line.amount = requested;
        Ok(requested)
    }

    /// 既存明細の数量を指定値にする
    /// 在庫チェックは明細の検索より先に行う
    ///
    /// # Returns
    /// * `Ok(true)` - 数量を変更した
    /// * `Ok(false)` - 明細がないため何もしなかった
    /// * `Err(DomainError::StockExceeded)` - 在庫不足
    pub fn set_amount(
        &mut self,
        product_id: ProductId,
        amount: Amount,
        stock: StockQuantity,
    ) -> Result<bool, DomainError> {
        if !stock.covers(amount) {
            return Err(DomainError::StockExceeded {
                product_id,
                requested: i64::from(amount.value()),
                available: stock.value(),
            });
        }

        match self
            .line_items
            .iter_mut()
            .find(|line| line.product_id() == product_id)
        {
            Some(line) => {
                line.amount = amount;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 明細を削除する
    /// 残りの明細の順序は保たれる
    pub fn remove(&mut self, product_id: ProductId) -> Result<CartLineItem, DomainError> {
        let index = self
            .line_items
            .iter()
            .position(|line| line.product_id() == product_id)
            .ok_or(DomainError::LineItemNotFound(product_id))?;
        Ok(self.line_items.remove(index))
    }
}
