// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::logging::LogEntry;
use crate::domain::model::{Product, ProductId, StockQuantity};
use async_trait::async_trait;

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// ログエントリを出力する
    fn log(&self, entry: LogEntry);
}

/// 在庫サービスエラー
/// 通信失敗・異常ステータス・レスポンス解析失敗を区別する
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InventoryError {
    /// 接続失敗やタイムアウト
    #[error("Inventory transport failed: {0}")]
    Transport(String),
    /// 2xx以外のステータス
    #[error("Inventory service responded with status {status} for {resource}")]
    Status { status: u16, resource: String },
    /// レスポンスを解析できない
    #[error("Inventory response could not be decoded: {0}")]
    Decode(String),
}

/// 在庫サービストレイト
/// 商品の在庫数と商品詳細を提供する外部サービスを抽象化する
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// 商品の現在の在庫数を取得する
    ///
    /// # Arguments
    /// * `product_id` - 商品ID
    ///
    /// # Returns
    /// * `Ok(StockQuantity)` - 在庫数
    /// * `Err(InventoryError)` - 取得失敗
    async fn get_stock(&self, product_id: ProductId) -> Result<StockQuantity, InventoryError>;

    /// 商品の詳細を取得する
    ///
    /// # Arguments
    /// * `product_id` - 商品ID
    ///
    /// # Returns
    /// * `Ok(Product)` - 商品詳細
    /// * `Err(InventoryError)` - 取得失敗
    async fn get_product(&self, product_id: ProductId) -> Result<Product, InventoryError>;
}

/// ストレージエラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage could not be opened: {0}")]
    OpenFailed(String),
    #[error("Storage write failed: {0}")]
    WriteFailed(String),
}

/// キーバリューストアトレイト
/// プロセス再起動後も残る同期的なキーバリュー保存先を抽象化する
pub trait KeyValueStore: Send + Sync {
    /// キーに対応する値を取得する。存在しなければ`None`
    fn get(&self, key: &str) -> Option<String>;

    /// キーに値を保存する
    ///
    /// # Returns
    /// * `Ok(())` - 保存成功
    /// * `Err(StorageError)` - 保存失敗
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// 通知トレイト
/// ユーザー向けのメッセージを表示する。制御フローには影響しない
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
