use crate::domain::model::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 商品
/// 在庫サービスの商品詳細取得で返されるカタログ属性
/// カート側からは変更しない
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    price: f64,
    image: String,
    /// 在庫サービスが返したその他の属性（そのまま保持する）
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Product {
    /// 新しい商品を作成
    ///
    /// # Arguments
    /// * `id` - 商品ID
    /// * `title` - 商品名
    /// * `price` - 価格
    /// * `image` - 画像URL
    pub fn new(id: ProductId, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            attributes: Map::new(),
        }
    }

    /// 追加属性を設定
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// 追加属性を取り除く
    pub fn without_attribute(mut self, key: &str) -> Self {
        self.attributes.remove(key);
        self
    }

    /// 商品IDを取得
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// 商品名を取得
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 価格を取得
    pub fn price(&self) -> f64 {
        self.price
    }

    /// 画像URLを取得
    pub fn image(&self) -> &str {
        &self.image
    }

    /// 追加属性を取得
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}
