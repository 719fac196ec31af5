use serde::{Deserialize, Serialize};

/// 数量変更用のリクエストDTO
/// 0以下の値もそのまま受け付ける（カートマネージャー側で無視される）
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateAmountRequest {
    pub amount: i64,
}
