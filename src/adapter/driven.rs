// 駆動される側アダプター（在庫サービス、ストア、通知、ログの実装）

mod console_logger;
mod http_inventory_service;
mod in_memory_store;
mod json_file_store;
mod notifier;

pub use console_logger::ConsoleLogger;
pub use http_inventory_service::HttpInventoryService;
pub use in_memory_store::InMemoryStore;
pub use json_file_store::JsonFileStore;
pub use notifier::{BufferedNotifier, CompositeNotifier, ConsoleNotifier};
