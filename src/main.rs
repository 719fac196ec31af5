use shopping_cart_management::adapter::driven::{
    BufferedNotifier, CompositeNotifier, ConsoleLogger, ConsoleNotifier, HttpInventoryService,
    JsonFileStore,
};
use shopping_cart_management::adapter::driver::{create_router, AppState};
use shopping_cart_management::adapter::AppConfig;
use shopping_cart_management::application::service::CartManager;

use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== ショッピングカート管理 REST API ===");
    println!();

    // .envファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    println!("在庫APIの接続先: {}", config.inventory_api_url);

    let inventory = Arc::new(HttpInventoryService::new(
        config.inventory_api_url.clone(),
        config.inventory_timeout,
    )?);

    let store = Arc::new(JsonFileStore::open(&config.storage_path)?);
    println!("カートの保存先: {}", store.path().display());

    // 通知はAPIで取得できるように保持し、サーバーのコンソールにも表示する
    let notifications = Arc::new(BufferedNotifier::new());
    let notifier = Arc::new(CompositeNotifier::new(vec![
        notifications.clone(),
        Arc::new(ConsoleNotifier::new()),
    ]));
    let logger = Arc::new(ConsoleLogger::new(config.log_level));

    // カートマネージャーを作成（保存済みのカートを復元する）
    let cart_manager = Arc::new(CartManager::with_storage_key(
        inventory,
        store,
        notifier,
        logger,
        config.storage_key.clone(),
    ));
    println!("カートを復元しました: {}件", cart_manager.cart_size());

    let app_state = AppState {
        cart_manager,
        notifications,
    };

    let app = create_router()
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    println!(
        "REST APIサーバーが起動しました: http://localhost:{}",
        config.server_port
    );
    println!("API仕様:");
    println!("  GET    /cart - カート取得");
    println!("  POST   /cart/products/:product_id - 商品追加");
    println!("  DELETE /cart/products/:product_id - 商品削除");
    println!("  PUT    /cart/products/:product_id - 数量変更");
    println!("  GET    /notifications - 通知取得");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}
