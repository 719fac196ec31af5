use crate::domain::model::{Cart, CartLineItem};
use thiserror::Error;

/// シリアライゼーションエラー
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SerializationError {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationFailed(String),

    #[error("JSON deserialization failed: {message}. Input: {input_preview}")]
    JsonDeserializationFailed {
        message: String,
        input_preview: String,
    },

    #[error("Cart snapshot violates invariant: {0}")]
    InvariantViolation(String),
}

impl SerializationError {
    /// 入力データのプレビューを生成（デバッグ用、最大100文字）
    fn create_input_preview(input: &str) -> String {
        if input.chars().count() <= 100 {
            input.to_string()
        } else {
            let head: String = input.chars().take(97).collect();
            format!("{}...", head)
        }
    }

    /// JSONデシリアライゼーションエラーを作成
    pub fn json_deserialization_failed(message: String, input: &str) -> Self {
        Self::JsonDeserializationFailed {
            message,
            input_preview: Self::create_input_preview(input),
        }
    }
}

/// カートシリアライザー
/// 永続化するカートのスナップショット（明細のJSON配列）を生成・解析する
#[derive(Debug, Clone, Copy, Default)]
pub struct CartSerializer;

impl CartSerializer {
    pub fn new() -> Self {
        Self
    }

    /// カートをJSON配列の文字列にシリアライズ
    pub fn serialize_cart(&self, cart: &Cart) -> Result<String, SerializationError> {
        serde_json::to_string(cart)
            .map_err(|e| SerializationError::JsonSerializationFailed(e.to_string()))
    }

    /// JSON文字列からカートを復元
    /// 明細の配列として解析でき、かつカートの不変条件を満たす場合のみ成功する
    pub fn deserialize_cart(&self, json: &str) -> Result<Cart, SerializationError> {
        if json.trim().is_empty() {
            return Err(SerializationError::json_deserialization_failed(
                "Empty JSON input".to_string(),
                json,
            ));
        }

        let line_items: Vec<CartLineItem> = serde_json::from_str(json).map_err(|e| {
            SerializationError::json_deserialization_failed(e.to_string(), json)
        })?;

        Cart::from_line_items(line_items)
            .map_err(|e| SerializationError::InvariantViolation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Amount, Product, ProductId};

    fn sample_cart() -> Cart {
        let first = Product::new(ProductId::new(1), "Tênis A", 179.9, "a.jpg");
        let second = Product::new(ProductId::new(2), "Tênis B", 139.9, "b.jpg");
        Cart::from_line_items(vec![
            CartLineItem::new(first, Amount::new(2).unwrap()),
            CartLineItem::new(second, Amount::new(1).unwrap()),
        ])
        .unwrap()
    }

    #[test]
    fn test_serialize_cart_as_array() {
        let serializer = CartSerializer::new();
        let json = serializer.serialize_cart(&sample_cart()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], 1);
        assert_eq!(items[0]["amount"], 2);
        assert_eq!(items[1]["id"], 2);
    }

    #[test]
    fn test_serialize_empty_cart() {
        let serializer = CartSerializer::new();
        assert_eq!(serializer.serialize_cart(&Cart::new()).unwrap(), "[]");
    }

    #[test]
    fn test_deserialize_preserves_order() {
        let serializer = CartSerializer::new();
        let cart = sample_cart();
        let json = serializer.serialize_cart(&cart).unwrap();
        let restored = serializer.deserialize_cart(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_deserialize_rejects_non_array() {
        let serializer = CartSerializer::new();
        let result = serializer.deserialize_cart(r#"{"id":1}"#);
        assert!(matches!(
            result,
            Err(SerializationError::JsonDeserializationFailed { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_empty_input() {
        let serializer = CartSerializer::new();
        assert!(serializer.deserialize_cart("   ").is_err());
    }

    #[test]
    fn test_deserialize_rejects_zero_amount() {
        let serializer = CartSerializer::new();
        let json = r#"[{"id":1,"title":"A","price":1.0,"image":"a.jpg","amount":0}]"#;
        assert!(serializer.deserialize_cart(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_ids() {
        let serializer = CartSerializer::new();
        let json = r#"[
            {"id":1,"title":"A","price":1.0,"image":"a.jpg","amount":1},
            {"id":1,"title":"A","price":1.0,"image":"a.jpg","amount":2}
        ]"#;
        assert!(matches!(
            serializer.deserialize_cart(json),
            Err(SerializationError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_input_preview_is_truncated_on_char_boundary() {
        let input = "é".repeat(150);
        let error = SerializationError::json_deserialization_failed("bad".to_string(), &input);
        match error {
            SerializationError::JsonDeserializationFailed { input_preview, .. } => {
                assert_eq!(input_preview.chars().count(), 100);
                assert!(input_preview.ends_with("..."));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
