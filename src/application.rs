// アプリケーション層
// カートマネージャーがポートを組み合わせてユースケースを実行する

pub mod error;
pub mod service;

pub use error::{CartError, CartNotice, CartOperation};
pub use service::{CartManager, Hydration};
