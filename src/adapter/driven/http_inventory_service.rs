use crate::domain::model::{Product, ProductId, StockQuantity};
use crate::domain::port::{InventoryError, InventoryService};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// 在庫APIのレスポンス（`GET /stock/:id`）
#[derive(Debug, Deserialize)]
struct StockResponse {
    amount: i64,
}

/// HTTP在庫サービス
/// REST APIの在庫・商品エンドポイントから情報を取得する
#[derive(Clone)]
pub struct HttpInventoryService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryService {
    /// 新しいHTTP在庫サービスを作成
    ///
    /// # Arguments
    /// * `base_url` - 在庫APIのベースURL（例: `http://localhost:3333`）
    /// * `timeout` - リクエストごとのタイムアウト
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, InventoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InventoryError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// ベースURLを取得
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: String) -> Result<T, InventoryError> {
        let response = self
            .client
            .get(self.url_for(&resource))
            .send()
            .await
            .map_err(|e| InventoryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InventoryError::Status {
                status: status.as_u16(),
                resource,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| InventoryError::Decode(e.to_string()))
    }
}

#[async_trait]
impl InventoryService for HttpInventoryService {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockQuantity, InventoryError> {
        let stock: StockResponse = self.fetch(format!("stock/{}", product_id)).await?;
        Ok(StockQuantity::new(stock.amount))
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        self.fetch(format!("products/{}", product_id)).await
    }
}
