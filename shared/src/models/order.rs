//! Order Model
//!
//! 订单状态机：
//!
//! ```text
//!         create
//!           │
//!           ▼
//!       [pending] ──Status(preparing)──► [preparing]
//!           │                 ▲  │
//!           │   Estimate      │  │ Status(done/canceled)
//!           │                 │  ▼
//!           └─────────────────┘ [done] / [canceled]
//! ```
//!
//! `done` / `canceled` 在业务上是终态，但 `Estimate` 会无条件把状态改回
//! `preparing`（沿用线上行为，见 [`OrderPatch::Estimate`]）。

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MenuItem;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// 新建订单，只能由创建产生
    #[default]
    Pending,
    /// 制作中
    Preparing,
    /// 已完成
    Done,
    /// 已取消
    Canceled,
}

impl OrderStatus {
    /// 可以通过 set_status 设置的目标状态 (`pending` 只能由创建产生)
    pub const SETTABLE: [OrderStatus; 3] = [
        OrderStatus::Preparing,
        OrderStatus::Done,
        OrderStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Done => "done",
            OrderStatus::Canceled => "canceled",
        }
    }

    /// Whether staff may set this status directly
    pub fn is_settable(&self) -> bool {
        Self::SETTABLE.contains(self)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Done | OrderStatus::Canceled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "done" => Ok(OrderStatus::Done),
            "canceled" => Ok(OrderStatus::Canceled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Order line: menu item reference + quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub menu_item_id: String,
    pub quantity: u32,
}

/// Preparation estimate
///
/// 分钟数和设置时间总是同时存在或同时缺失。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrepEstimate {
    pub minutes: f64,
    /// Unix millis
    pub set_at: i64,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub table_number: u32,
    /// Opaque customer identity, used as list filter
    #[serde(default)]
    pub customer_name: Option<String>,
    pub line_items: Vec<LineItem>,
    /// Caller-declared total in currency unit (never recomputed)
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    /// Only meaningful while `status = preparing`
    #[serde(default)]
    pub estimate: Option<PrepEstimate>,
    /// Unix millis, immutable
    pub created_at: i64,
}

impl Order {
    /// Build a fresh `pending` order without estimate
    pub fn new(id: String, params: OrderCreate, created_at: i64) -> Self {
        Self {
            id,
            table_number: params.table_number,
            customer_name: params.customer_name,
            line_items: params.line_items,
            total: params.total,
            status: OrderStatus::Pending,
            estimate: None,
            created_at,
        }
    }

    /// Distinct menu item ids referenced by this order, in first-seen order
    pub fn menu_item_ids(&self) -> Vec<String> {
        distinct_ids(&self.line_items)
    }

    /// Apply a staff patch in place
    pub fn apply(&mut self, patch: &OrderPatch) {
        match *patch {
            OrderPatch::Estimate { minutes, set_at } => {
                self.estimate = Some(PrepEstimate { minutes, set_at });
                self.status = OrderStatus::Preparing;
            }
            OrderPatch::Status(status) => {
                self.status = status;
                if status != OrderStatus::Preparing {
                    self.estimate = None;
                }
            }
        }
    }
}

/// Staff mutation applied atomically by the document store
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderPatch {
    /// 设置预计时间，同时强制 `preparing`，不论原状态
    Estimate { minutes: f64, set_at: i64 },
    /// 直接设置状态；非 `preparing` 时清除预计时间
    Status(OrderStatus),
}

/// Create order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_number: u32,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub line_items: Vec<LineItem>,
    pub total: f64,
}

impl OrderCreate {
    /// Distinct menu item ids, in first-seen order
    pub fn menu_item_ids(&self) -> Vec<String> {
        distinct_ids(&self.line_items)
    }
}

fn distinct_ids(items: &[LineItem]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !ids.contains(&item.menu_item_id) {
            ids.push(item.menu_item_id.clone());
        }
    }
    ids
}

/// Line item joined against live menu data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLineItem {
    pub menu_item_id: String,
    pub quantity: u32,
    /// `None` when the menu item was removed after the order was placed
    pub menu_item: Option<MenuItem>,
}

/// Reference-resolved order (API / event payload)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: String,
    pub table_number: u32,
    pub customer_name: Option<String>,
    pub line_items: Vec<ResolvedLineItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub estimate: Option<PrepEstimate>,
    pub created_at: i64,
}

impl OrderDetail {
    /// Read-time join: order + menu items keyed by id
    pub fn join(order: Order, menu: &HashMap<String, MenuItem>) -> Self {
        let line_items = order
            .line_items
            .into_iter()
            .map(|item| ResolvedLineItem {
                menu_item: menu.get(&item.menu_item_id).cloned(),
                menu_item_id: item.menu_item_id,
                quantity: item.quantity,
            })
            .collect();

        Self {
            id: order.id,
            table_number: order.table_number,
            customer_name: order.customer_name,
            line_items,
            total: order.total,
            status: order.status,
            estimate: order.estimate,
            created_at: order.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order::new(
            "o1".to_string(),
            OrderCreate {
                table_number: 4,
                customer_name: Some("Ana".to_string()),
                line_items: vec![
                    LineItem {
                        menu_item_id: "m1".to_string(),
                        quantity: 2,
                    },
                    LineItem {
                        menu_item_id: "m1".to_string(),
                        quantity: 1,
                    },
                ],
                total: 9.5,
            },
            1_000,
        )
    }

    #[test]
    fn test_new_order_is_pending_without_estimate() {
        let order = sample_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.estimate.is_none());
        assert_eq!(order.menu_item_ids(), vec!["m1".to_string()]);
    }

    #[test]
    fn test_estimate_forces_preparing() {
        let mut order = sample_order();
        order.apply(&OrderPatch::Estimate {
            minutes: 15.0,
            set_at: 2_000,
        });
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(
            order.estimate,
            Some(PrepEstimate {
                minutes: 15.0,
                set_at: 2_000
            })
        );
    }

    #[test]
    fn test_estimate_overrides_terminal_status() {
        let mut order = sample_order();
        order.apply(&OrderPatch::Status(OrderStatus::Done));
        order.apply(&OrderPatch::Estimate {
            minutes: 5.0,
            set_at: 3_000,
        });
        assert_eq!(order.status, OrderStatus::Preparing);
    }

    #[test]
    fn test_status_keeps_estimate_only_while_preparing() {
        let mut order = sample_order();
        order.apply(&OrderPatch::Estimate {
            minutes: 10.0,
            set_at: 2_000,
        });
        order.apply(&OrderPatch::Status(OrderStatus::Preparing));
        assert!(order.estimate.is_some());

        order.apply(&OrderPatch::Status(OrderStatus::Canceled));
        assert_eq!(order.status, OrderStatus::Canceled);
        assert!(order.estimate.is_none());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("done".parse::<OrderStatus>(), Ok(OrderStatus::Done));
        assert_eq!(
            "served".parse::<OrderStatus>(),
            Err(UnknownStatus("served".to_string()))
        );
        assert!(!OrderStatus::Pending.is_settable());
        assert!(OrderStatus::Canceled.is_settable());
        assert!(OrderStatus::Done.is_terminal());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");
    }

    #[test]
    fn test_join_marks_missing_menu_items() {
        let mut menu = HashMap::new();
        menu.insert(
            "m1".to_string(),
            MenuItem {
                id: "m1".to_string(),
                name: "Flat white".to_string(),
                description: None,
                price: 4.75,
                category: "coffee".to_string(),
                image: None,
                created_at: 0,
            },
        );
        let mut order = sample_order();
        order.line_items.push(LineItem {
            menu_item_id: "gone".to_string(),
            quantity: 1,
        });

        let detail = OrderDetail::join(order, &menu);
        assert_eq!(detail.line_items.len(), 3);
        assert_eq!(
            detail.line_items[0].menu_item.as_ref().map(|m| m.name.as_str()),
            Some("Flat white")
        );
        assert!(detail.line_items[2].menu_item.is_none());
    }
}
