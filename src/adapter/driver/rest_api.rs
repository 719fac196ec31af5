use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::adapter::driven::BufferedNotifier;
use crate::adapter::driver::request_dto::UpdateAmountRequest;
use crate::adapter::driver::response_dto::{CartResponse, NotificationsResponse};
use crate::application::service::{CartManager, UpdateProductAmount};
use crate::domain::model::ProductId;

// カートマネージャーと通知バッファを含む状態
// 起動時に一度だけ作成し、すべてのハンドラーで共有する
#[derive(Clone)]
pub struct AppState {
    pub cart_manager: Arc<CartManager>,
    pub notifications: Arc<BufferedNotifier>,
}

// REST APIルーターを作成
// カート操作は失敗しても200を返す。失敗はカートが変わらないことと通知で表れる
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/cart", get(get_cart))
        .route(
            "/cart/products/:product_id",
            post(add_product)
                .delete(remove_product)
                .put(update_product_amount),
        )
        .route("/notifications", get(drain_notifications))
}

// ヘルスチェックエンドポイント
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "shopping-cart-management",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// カート取得エンドポイント
async fn get_cart(State(state): State<AppState>) -> Json<CartResponse> {
    Json(CartResponse::from(&state.cart_manager.cart()))
}

// 商品追加エンドポイント
async fn add_product(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
) -> Json<CartResponse> {
    state
        .cart_manager
        .add_product(ProductId::new(product_id))
        .await;
    Json(CartResponse::from(&state.cart_manager.cart()))
}

// 商品削除エンドポイント
async fn remove_product(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
) -> Json<CartResponse> {
    state.cart_manager.remove_product(ProductId::new(product_id));
    Json(CartResponse::from(&state.cart_manager.cart()))
}

// 数量変更エンドポイント
async fn update_product_amount(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
    Json(request): Json<UpdateAmountRequest>,
) -> Json<CartResponse> {
    state
        .cart_manager
        .update_product_amount(UpdateProductAmount {
            product_id: ProductId::new(product_id),
            amount: request.amount,
        })
        .await;
    Json(CartResponse::from(&state.cart_manager.cart()))
}

// 通知取得エンドポイント（取得した通知はバッファから消える）
async fn drain_notifications(State(state): State<AppState>) -> Json<NotificationsResponse> {
    Json(NotificationsResponse {
        messages: state.notifications.drain(),
    })
}
