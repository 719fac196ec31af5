use crate::application::{CartError, CartOperation};
use crate::domain::logging::LogEntry;
use crate::domain::model::{Amount, Cart, CartLineItem, ProductId};
use crate::domain::port::{InventoryError, InventoryService, KeyValueStore, Logger, Notifier};
use crate::domain::serialization::{CartSerializer, SerializationError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// カートを永続化する既定のキー
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

const COMPONENT: &str = "CartManager";

/// 数量変更リクエスト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// 0以下も受け付ける（その場合は何もしない）
    pub amount: i64,
}

/// 起動時の復元結果
#[derive(Debug, Clone, PartialEq)]
pub enum Hydration {
    /// スナップショットから復元した
    Restored { line_items: usize },
    /// スナップショットが存在しなかった
    Empty,
    /// スナップショットを解析できず空のカートで開始した
    Recovered { error: SerializationError },
}

/// カートマネージャー
/// カートの状態を保持し、追加・削除・数量変更の3操作を提供する
///
/// 各操作は在庫サービスへの問い合わせを先に済ませ、その後の同期的なコミットで
/// 現在のカートに対して変更を適用し直す。コミット中はロックを保持したまま
/// スナップショットを書き込み、書き込みが成功した場合のみメモリ上の状態を差し替える。
pub struct CartManager {
    inventory: Arc<dyn InventoryService>,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    logger: Arc<dyn Logger>,
    serializer: CartSerializer,
    storage_key: String,
    cart: Mutex<Cart>,
    hydration: Hydration,
}

impl CartManager {
    /// 既定のキーでカートマネージャーを作成
    ///
    /// # Arguments
    /// * `inventory` - 在庫サービス
    /// * `store` - キーバリューストア
    /// * `notifier` - 通知先
    /// * `logger` - ロガー
    pub fn new(
        inventory: Arc<dyn InventoryService>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self::with_storage_key(inventory, store, notifier, logger, DEFAULT_STORAGE_KEY)
    }

    /// 保存キーを指定してカートマネージャーを作成
    /// ストアからカートを復元する。復元に失敗しても作成自体は失敗しない
    pub fn with_storage_key(
        inventory: Arc<dyn InventoryService>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        logger: Arc<dyn Logger>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let serializer = CartSerializer::new();
        let (cart, hydration) = Self::hydrate(store.as_ref(), &serializer, &storage_key);

        let entry = match &hydration {
            Hydration::Restored { line_items } => {
                LogEntry::info(COMPONENT, "Cart restored from snapshot")
                    .with_context("line_items", line_items)
            }
            Hydration::Empty => LogEntry::info(COMPONENT, "No cart snapshot found, starting empty"),
            Hydration::Recovered { error } => {
                LogEntry::warn(COMPONENT, "Cart snapshot unreadable, starting empty")
                    .with_context("error", error)
            }
        };
        logger.log(entry.with_context("storage_key", &storage_key));

        Self {
            inventory,
            store,
            notifier,
            logger,
            serializer,
            storage_key,
            cart: Mutex::new(cart),
            hydration,
        }
    }

    fn hydrate(
        store: &dyn KeyValueStore,
        serializer: &CartSerializer,
        storage_key: &str,
    ) -> (Cart, Hydration) {
        let Some(snapshot) = store.get(storage_key) else {
            return (Cart::new(), Hydration::Empty);
        };

        match serializer.deserialize_cart(&snapshot) {
            Ok(cart) => {
                let line_items = cart.len();
                (cart, Hydration::Restored { line_items })
            }
            Err(error) => (Cart::new(), Hydration::Recovered { error }),
        }
    }

    /// 現在のカートのスナップショットを取得
    pub fn cart(&self) -> Cart {
        self.lock_cart().clone()
    }

    /// 現在の明細のリストを取得
    pub fn line_items(&self) -> Vec<CartLineItem> {
        self.lock_cart().line_items().to_vec()
    }

    /// カート内の商品の種類数を取得
    pub fn cart_size(&self) -> usize {
        self.lock_cart().len()
    }

    /// 商品の数量を取得
    pub fn amount_of(&self, product_id: ProductId) -> Option<Amount> {
        self.lock_cart().amount_of(product_id)
    }

    /// 起動時の復元結果を取得
    pub fn hydration(&self) -> &Hydration {
        &self.hydration
    }

    /// 保存キーを取得
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// 商品をカートに追加する
    /// 未登録なら数量1で追加し、登録済みなら在庫の範囲で数量を1増やす
    ///
    /// 失敗は通知として報告され、呼び出し元には返らない
    pub async fn add_product(&self, product_id: ProductId) {
        let correlation_id = self.start(CartOperation::AddProduct, product_id);
        let result = self.try_add_product(product_id).await;
        self.finish(CartOperation::AddProduct, product_id, correlation_id, result);
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<bool, CartError> {
        let existing = self.amount_of(product_id);
        let stock = self.inventory.get_stock(product_id).await?;

        if existing.is_some() {
            return self.commit(|cart| {
                cart.increment(product_id, stock)?;
                Ok(true)
            });
        }

        // 新規追加の経路では在庫数のチェックを行わない
        let product = self.inventory.get_product(product_id).await?;
        if product.id() != product_id {
            return Err(InventoryError::Decode(format!(
                "requested product {} but received {}",
                product_id,
                product.id()
            ))
            .into());
        }

        self.commit(|cart| {
            // 問い合わせ中に別の操作で追加された場合は既存明細の増加として扱う
            if cart.contains(product_id) {
                cart.increment(product_id, stock)?;
            } else {
                cart.append(CartLineItem::new(product, Amount::ONE))?;
            }
            Ok(true)
        })
    }

    /// 商品をカートから削除する
    /// カートにない商品の場合は失敗として通知する
    pub fn remove_product(&self, product_id: ProductId) {
        let correlation_id = self.start(CartOperation::RemoveProduct, product_id);
        let result = self.commit(|cart| {
            cart.remove(product_id)?;
            Ok(true)
        });
        self.finish(CartOperation::RemoveProduct, product_id, correlation_id, result);
    }

    /// 既存明細の数量を指定値に変更する
    /// 0以下の数量は通知せずに無視する。カートにない商品の場合も何もしない
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        let correlation_id = self.start(CartOperation::UpdateProductAmount, request.product_id);
        let result = self.try_update_product_amount(request).await;
        self.finish(
            CartOperation::UpdateProductAmount,
            request.product_id,
            correlation_id,
            result,
        );
    }

    async fn try_update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<bool, CartError> {
        let amount = Amount::new(request.amount)?;
        let stock = self.inventory.get_stock(request.product_id).await?;

        self.commit(|cart| Ok(cart.set_amount(request.product_id, amount, stock)?))
    }

    /// 変更を現在のカートに適用して永続化する
    /// 変更がなければ何も書き込まない。書き込みに失敗した場合はメモリ上の状態も変えない
    fn commit<F>(&self, mutation: F) -> Result<bool, CartError>
    where
        F: FnOnce(&mut Cart) -> Result<bool, CartError>,
    {
        let mut cart = self.lock_cart();
        let mut working = cart.clone();

        if !mutation(&mut working)? {
            return Ok(false);
        }

        let snapshot = self.serializer.serialize_cart(&working)?;
        self.store.set(&self.storage_key, &snapshot)?;
        *cart = working;
        Ok(true)
    }

    fn lock_cart(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(&self, operation: CartOperation, product_id: ProductId) -> Uuid {
        let correlation_id = Uuid::new_v4();
        self.logger.log(
            LogEntry::debug(COMPONENT, format!("{} started", operation.as_str()))
                .with_correlation_id(correlation_id)
                .with_context("product_id", product_id),
        );
        correlation_id
    }

    fn finish(
        &self,
        operation: CartOperation,
        product_id: ProductId,
        correlation_id: Uuid,
        result: Result<bool, CartError>,
    ) {
        let error = match result {
            Ok(changed) => {
                let amount = self
                    .amount_of(product_id)
                    .map(|amount| amount.to_string())
                    .unwrap_or_else(|| "-".to_string());
                self.logger.log(
                    LogEntry::info(COMPONENT, format!("{} completed", operation.as_str()))
                        .with_correlation_id(correlation_id)
                        .with_context("product_id", product_id)
                        .with_context("changed", changed)
                        .with_context("amount", amount)
                        .with_context("cart_size", self.cart_size()),
                );
                return;
            }
            Err(error) => error,
        };

        let Some(notice) = error.notice(operation) else {
            self.logger.log(
                LogEntry::debug(COMPONENT, format!("{} ignored", operation.as_str()))
                    .with_correlation_id(correlation_id)
                    .with_context("product_id", product_id)
                    .with_context("reason", &error),
            );
            return;
        };

        let entry = if error.is_rejection() {
            LogEntry::warn(COMPONENT, format!("{} rejected", operation.as_str()))
        } else {
            LogEntry::error(COMPONENT, format!("{} failed", operation.as_str()))
        };
        self.logger.log(
            entry
                .with_correlation_id(correlation_id)
                .with_context("product_id", product_id)
                .with_context("error", &error)
                .with_context("notice", notice),
        );

        self.notifier.notify(notice.message());
    }
}
