use axum_test::TestServer;
use shopping_cart_management::adapter::driven::{BufferedNotifier, ConsoleLogger, InMemoryStore};
use shopping_cart_management::adapter::driver::response_dto::{CartResponse, NotificationsResponse};
use shopping_cart_management::adapter::driver::{create_router, AppState};
use shopping_cart_management::application::service::{CartManager, DEFAULT_STORAGE_KEY};
use shopping_cart_management::domain::logging::LogLevel;
use shopping_cart_management::domain::model::{Product, ProductId, StockQuantity};
use shopping_cart_management::domain::port::{InventoryError, InventoryService, KeyValueStore};

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

struct StubInventoryService {
    stock: HashMap<ProductId, i64>,
}

#[async_trait]
impl InventoryService for StubInventoryService {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockQuantity, InventoryError> {
        self.stock
            .get(&product_id)
            .map(|amount| StockQuantity::new(*amount))
            .ok_or(InventoryError::Status {
                status: 404,
                resource: format!("stock/{}", product_id),
            })
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        Ok(
            Product::new(product_id, format!("Tênis {}", product_id), 139.9, "tenis.jpg")
                .with_attribute("priceFormatted", json!("R$ 139,90")),
        )
    }
}

struct TestApp {
    server: TestServer,
    store: Arc<InMemoryStore>,
}

fn test_app(stock: &[(u64, i64)]) -> TestApp {
    let inventory = StubInventoryService {
        stock: stock
            .iter()
            .map(|(id, amount)| (ProductId::new(*id), *amount))
            .collect(),
    };
    let store = Arc::new(InMemoryStore::new());
    let notifications = Arc::new(BufferedNotifier::new());
    let cart_manager = Arc::new(CartManager::new(
        Arc::new(inventory),
        store.clone(),
        notifications.clone(),
        Arc::new(ConsoleLogger::new(LogLevel::Error)),
    ));

    let app = create_router().with_state(AppState {
        cart_manager,
        notifications,
    });

    TestApp {
        server: TestServer::new(app).unwrap(),
        store,
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app(&[]);

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_empty_cart() {
    let app = test_app(&[]);

    let response = app.server.get("/cart").await;

    response.assert_status_ok();
    let cart = response.json::<CartResponse>();
    assert!(cart.items.is_empty());
    assert_eq!(cart.size, 0);
}

#[tokio::test]
async fn test_add_product_returns_updated_cart() {
    let app = test_app(&[(1, 3)]);

    let response = app.server.post("/cart/products/1").await;

    response.assert_status_ok();
    let cart = response.json::<CartResponse>();
    assert_eq!(cart.size, 1);
    assert_eq!(cart.items[0].id, 1);
    assert_eq!(cart.items[0].title, "Tênis 1");
    assert_eq!(cart.items[0].amount, 1);
    assert_eq!(cart.items[0].attributes["priceFormatted"], "R$ 139,90");

    // 同じ商品を再度追加すると数量が増える
    let cart = app.server.post("/cart/products/1").await.json::<CartResponse>();
    assert_eq!(cart.items[0].amount, 2);
    assert!(app.store.get(DEFAULT_STORAGE_KEY).is_some());
}

#[tokio::test]
async fn test_add_beyond_stock_reports_notification() {
    let app = test_app(&[(1, 1)]);
    app.server.post("/cart/products/1").await;

    let response = app.server.post("/cart/products/1").await;

    response.assert_status_ok();
    assert_eq!(response.json::<CartResponse>().items[0].amount, 1);

    let notifications = app.server.get("/notifications").await.json::<NotificationsResponse>();
    assert_eq!(
        notifications.messages,
        vec!["requested quantity unavailable in stock".to_string()]
    );

    // 取得済みの通知は再度返らない
    let notifications = app.server.get("/notifications").await.json::<NotificationsResponse>();
    assert!(notifications.messages.is_empty());
}

#[tokio::test]
async fn test_add_unknown_product_reports_failure() {
    let app = test_app(&[]);

    let response = app.server.post("/cart/products/42").await;

    response.assert_status_ok();
    assert!(response.json::<CartResponse>().items.is_empty());

    let notifications = app.server.get("/notifications").await.json::<NotificationsResponse>();
    assert_eq!(notifications.messages, vec!["error adding product".to_string()]);
}

#[tokio::test]
async fn test_update_amount() {
    let app = test_app(&[(1, 5)]);
    app.server.post("/cart/products/1").await;

    let response = app
        .server
        .put("/cart/products/1")
        .json(&json!({ "amount": 4 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<CartResponse>().items[0].amount, 4);
}

#[tokio::test]
async fn test_update_with_zero_amount_is_ignored() {
    let app = test_app(&[(1, 5)]);
    app.server.post("/cart/products/1").await;

    let response = app
        .server
        .put("/cart/products/1")
        .json(&json!({ "amount": 0 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<CartResponse>().items[0].amount, 1);

    let notifications = app.server.get("/notifications").await.json::<NotificationsResponse>();
    assert!(notifications.messages.is_empty());
}

#[tokio::test]
async fn test_remove_product() {
    let app = test_app(&[(1, 5), (2, 5)]);
    app.server.post("/cart/products/1").await;
    app.server.post("/cart/products/2").await;

    let response = app.server.delete("/cart/products/1").await;

    response.assert_status_ok();
    let cart = response.json::<CartResponse>();
    assert_eq!(cart.size, 1);
    assert_eq!(cart.items[0].id, 2);
}

#[tokio::test]
async fn test_remove_absent_product_reports_failure() {
    let app = test_app(&[]);

    let response = app.server.delete("/cart/products/7").await;

    response.assert_status_ok();
    let notifications = app.server.get("/notifications").await.json::<NotificationsResponse>();
    assert_eq!(notifications.messages, vec!["error removing product".to_string()]);
}
