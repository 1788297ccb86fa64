//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// 订单只按 id 引用菜单项，读取时实时 join，不在订单上冗余存储。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in currency unit
    pub price: f64,
    #[serde(default = "default_category")]
    pub category: String,
    /// Image URL (asset store)
    pub image: Option<String>,
    /// Unix millis
    #[serde(default)]
    pub created_at: i64,
}

fn default_category() -> String {
    "general".to_string()
}
