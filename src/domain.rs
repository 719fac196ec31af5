// ドメイン層
// カートのビジネスルールと外部依存のポートを定義する

pub mod error;
pub mod logging;
pub mod model;
pub mod port;
pub mod serialization;
