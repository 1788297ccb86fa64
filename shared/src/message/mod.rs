//! 实时订单事件定义
//!
//! 服务端每次成功写入订单后发布一条事件，通过 WebSocket 推送到所有订阅者。
//!
//! 线上格式：
//!
//! ```json
//! { "event": "newOrder", "data": { ...OrderDetail } }
//! { "event": "orderUpdate", "data": { ...OrderDetail } }
//! { "event": "orderDeleted", "data": { "id": "..." } }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::OrderDetail;

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderEventKind {
    /// 新订单
    NewOrder,
    /// 订单更新 (预计时间 / 状态)
    OrderUpdate,
    /// 订单删除
    OrderDeleted,
}

impl fmt::Display for OrderEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewOrder => write!(f, "newOrder"),
            Self::OrderUpdate => write!(f, "orderUpdate"),
            Self::OrderDeleted => write!(f, "orderDeleted"),
        }
    }
}

/// 删除事件载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDeletedPayload {
    pub id: String,
}

/// 订单变更事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum OrderEvent {
    NewOrder(Box<OrderDetail>),
    OrderUpdate(Box<OrderDetail>),
    OrderDeleted(OrderDeletedPayload),
}

impl OrderEvent {
    pub fn new_order(detail: OrderDetail) -> Self {
        Self::NewOrder(Box::new(detail))
    }

    pub fn order_update(detail: OrderDetail) -> Self {
        Self::OrderUpdate(Box::new(detail))
    }

    pub fn order_deleted(id: impl Into<String>) -> Self {
        Self::OrderDeleted(OrderDeletedPayload { id: id.into() })
    }

    pub fn kind(&self) -> OrderEventKind {
        match self {
            Self::NewOrder(_) => OrderEventKind::NewOrder,
            Self::OrderUpdate(_) => OrderEventKind::OrderUpdate,
            Self::OrderDeleted(_) => OrderEventKind::OrderDeleted,
        }
    }

    /// 事件涉及的订单 ID
    pub fn order_id(&self) -> &str {
        match self {
            Self::NewOrder(detail) | Self::OrderUpdate(detail) => &detail.id,
            Self::OrderDeleted(payload) => &payload.id,
        }
    }

    /// 序列化为 WebSocket 文本帧
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;

    fn detail(id: &str) -> OrderDetail {
        OrderDetail {
            id: id.to_string(),
            table_number: 4,
            customer_name: None,
            line_items: vec![],
            total: 9.5,
            status: OrderStatus::Pending,
            estimate: None,
            created_at: 1,
        }
    }

    #[test]
    fn test_event_kind_display() {
        assert_eq!(OrderEventKind::NewOrder.to_string(), "newOrder");
        assert_eq!(OrderEventKind::OrderUpdate.to_string(), "orderUpdate");
        assert_eq!(OrderEventKind::OrderDeleted.to_string(), "orderDeleted");
    }

    #[test]
    fn test_deleted_wire_format() {
        let json = OrderEvent::order_deleted("o1").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event"], "orderDeleted");
        assert_eq!(value["data"], serde_json::json!({ "id": "o1" }));
    }

    #[test]
    fn test_update_wire_format() {
        let event = OrderEvent::order_update(detail("o2"));
        assert_eq!(event.kind(), OrderEventKind::OrderUpdate);
        assert_eq!(event.order_id(), "o2");

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "orderUpdate");
        assert_eq!(value["data"]["status"], "pending");

        let parsed: OrderEvent = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, event);
    }
}
