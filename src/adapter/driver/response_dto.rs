use crate::domain::model::{Cart, CartLineItem};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// カート明細のレスポンスDTO
#[derive(Debug, Serialize, Deserialize)]
pub struct CartLineItemResponse {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
    /// 在庫サービスが返したその他の属性
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl From<&CartLineItem> for CartLineItemResponse {
    fn from(line_item: &CartLineItem) -> Self {
        let product = line_item.product();
        Self {
            id: product.id().value(),
            title: product.title().to_string(),
            price: product.price(),
            image: product.image().to_string(),
            amount: line_item.amount().value(),
            attributes: product.attributes().clone(),
        }
    }
}

/// カートのレスポンスDTO
#[derive(Debug, Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartLineItemResponse>,
    /// 商品の種類数
    pub size: usize,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.line_items().iter().map(CartLineItemResponse::from).collect(),
            size: cart.len(),
        }
    }
}

/// 通知一覧のレスポンスDTO
#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Amount, Product, ProductId};

    #[test]
    fn test_cart_response_from_cart() {
        let product = Product::new(ProductId::new(3), "Tênis", 139.9, "3.jpg")
            .with_attribute("brand", Value::from("Rocket"));
        let cart = Cart::from_line_items(vec![CartLineItem::new(product, Amount::new(2).unwrap())])
            .unwrap();

        let response = CartResponse::from(&cart);

        assert_eq!(response.size, 1);
        assert_eq!(response.items[0].id, 3);
        assert_eq!(response.items[0].amount, 2);
        assert_eq!(response.items[0].title, "Tênis");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["items"][0]["brand"], "Rocket");
    }

    #[test]
    fn test_response_has_single_amount_key() {
        let product = Product::new(ProductId::new(1), "Tênis", 139.9, "1.jpg")
            .with_attribute("amount", Value::from(7));
        let cart = Cart::from_line_items(vec![CartLineItem::new(product, Amount::ONE)]).unwrap();

        let json = serde_json::to_string(&CartResponse::from(&cart)).unwrap();

        assert_eq!(json.matches("\"amount\"").count(), 1);
        let parsed: CartResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.items[0].amount, 1);
    }

    #[test]
    fn test_empty_cart_response() {
        let response = CartResponse::from(&Cart::new());
        assert!(response.items.is_empty());
        assert_eq!(response.size, 0);
    }
}
