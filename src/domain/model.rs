// ドメインモデル（エンティティと値オブジェクト）

mod value_objects;
mod product;
mod cart;

pub use value_objects::{Amount, ProductId, StockQuantity};

pub use product::Product;
pub use cart::{Cart, CartLineItem};
