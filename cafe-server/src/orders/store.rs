//! OrderStore - 订单生命周期
//!
//! 所有写操作：校验 → 持久化 → 发布事件。任何失败都在持久化之前返回，
//! 不产生部分写入，也不发布事件。提交之后不再返回错误：菜单关联失败时
//! 降级为未解析的行项目，事件照常发布。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use shared::message::OrderEvent;
use shared::models::{MenuItem, Order, OrderCreate, OrderDetail, OrderPatch, OrderStatus};
use shared::util::{new_order_id, now_millis};

use super::error::{OrderError, OrderResult};
use crate::db::{MenuLookup, OrderFilter, OrderRepository};
use crate::message::BroadcastHub;
use crate::utils::validation::{
    MAX_LINE_ITEMS, MAX_NAME_LEN, validate_non_negative, validate_optional_name,
    validate_positive,
};

/// 订单存储服务
///
/// 依赖通过构造注入，不使用全局状态。
#[derive(Clone)]
pub struct OrderStore {
    orders: Arc<dyn OrderRepository>,
    menu: Arc<dyn MenuLookup>,
    hub: BroadcastHub,
}

impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("subscribers", &self.hub.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl OrderStore {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        menu: Arc<dyn MenuLookup>,
        hub: BroadcastHub,
    ) -> Self {
        Self { orders, menu, hub }
    }

    pub fn hub(&self) -> &BroadcastHub {
        &self.hub
    }

    /// 创建订单
    ///
    /// 新订单总是 `pending`、无预计时间；`total` 按调用方声明保存，不重新计算。
    pub async fn create(&self, params: OrderCreate) -> OrderResult<OrderDetail> {
        validate_create(&params)?;

        let ids = params.menu_item_ids();
        let found = self.menu.find_by_ids(&ids).await?;
        if found.len() != ids.len() {
            let missing: Vec<String> = ids
                .into_iter()
                .filter(|id| !found.iter().any(|item| &item.id == id))
                .collect();
            tracing::warn!(missing = ?missing, "Order references unknown menu items");
            return Err(OrderError::InvalidReference(missing));
        }

        let order = Order::new(new_order_id(), params, now_millis());
        self.orders.insert(&order).await?;

        tracing::info!(
            order_id = %order.id,
            table_number = order.table_number,
            lines = order.line_items.len(),
            total = order.total,
            "Order created"
        );

        let detail = OrderDetail::join(order, &index_menu(found));
        self.hub.publish(OrderEvent::new_order(detail.clone()));
        Ok(detail)
    }

    /// 设置预计制作时间
    ///
    /// 无论当前状态如何都会切换到 `preparing`，包括 `done` / `canceled`。
    pub async fn set_estimated_time(&self, id: &str, minutes: f64) -> OrderResult<OrderDetail> {
        validate_positive(minutes, "time")?;

        let patch = OrderPatch::Estimate {
            minutes,
            set_at: now_millis(),
        };
        let order = self
            .orders
            .update_by_id(id, &patch)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        tracing::info!(order_id = %id, minutes, "Order estimate set");

        let detail = self.resolve_committed(order).await;
        self.hub.publish(OrderEvent::order_update(detail.clone()));
        Ok(detail)
    }

    /// 设置订单状态
    ///
    /// 只接受 `preparing` / `done` / `canceled`，在查找订单之前校验。
    pub async fn set_status(&self, id: &str, status: &str) -> OrderResult<OrderDetail> {
        let status = parse_settable_status(status)?;

        let order = self
            .orders
            .update_by_id(id, &OrderPatch::Status(status))
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        tracing::info!(order_id = %id, status = %status, "Order status changed");

        let detail = self.resolve_committed(order).await;
        self.hub.publish(OrderEvent::order_update(detail.clone()));
        Ok(detail)
    }

    /// 永久删除订单
    pub async fn delete(&self, id: &str) -> OrderResult<()> {
        self.orders
            .delete_by_id(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        tracing::info!(order_id = %id, "Order deleted");

        self.hub.publish(OrderEvent::order_deleted(id));
        Ok(())
    }

    /// 订单列表，`created_at` 降序
    pub async fn list(&self, filter: &OrderFilter) -> OrderResult<Vec<OrderDetail>> {
        let orders = self.orders.find_many(filter).await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = orders
            .iter()
            .flat_map(Order::menu_item_ids)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let menu = index_menu(self.menu.find_by_ids(&ids).await?);

        Ok(orders
            .into_iter()
            .map(|order| OrderDetail::join(order, &menu))
            .collect())
    }

    pub async fn get(&self, id: &str) -> OrderResult<OrderDetail> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        self.resolve(order).await
    }

    /// 读取时关联菜单项；已被移除的菜单项解析为 `None`
    async fn resolve(&self, order: Order) -> OrderResult<OrderDetail> {
        let menu = index_menu(self.menu.find_by_ids(&order.menu_item_ids()).await?);
        Ok(OrderDetail::join(order, &menu))
    }

    /// 写入已提交后的关联，失败只记录日志
    async fn resolve_committed(&self, order: Order) -> OrderDetail {
        match self.menu.find_by_ids(&order.menu_item_ids()).await {
            Ok(items) => OrderDetail::join(order, &index_menu(items)),
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "Menu join failed after commit, line items left unresolved");
                OrderDetail::join(order, &HashMap::new())
            }
        }
    }
}

fn validate_create(params: &OrderCreate) -> OrderResult<()> {
    if params.line_items.is_empty() {
        return Err(OrderError::Validation(
            "line_items must not be empty".to_string(),
        ));
    }
    if params.line_items.len() > MAX_LINE_ITEMS {
        return Err(OrderError::Validation(format!(
            "too many line_items ({}, max {MAX_LINE_ITEMS})",
            params.line_items.len()
        )));
    }
    if let Some(item) = params.line_items.iter().find(|item| item.quantity < 1) {
        return Err(OrderError::Validation(format!(
            "quantity for {} must be at least 1",
            item.menu_item_id
        )));
    }
    if params.table_number == 0 {
        return Err(OrderError::Validation(
            "table_number must be positive".to_string(),
        ));
    }
    validate_non_negative(params.total, "total")?;
    validate_optional_name(&params.customer_name, "customer_name", MAX_NAME_LEN)?;
    Ok(())
}

fn parse_settable_status(raw: &str) -> OrderResult<OrderStatus> {
    match raw.parse::<OrderStatus>() {
        Ok(status) if status.is_settable() => Ok(status),
        _ => Err(OrderError::InvalidStatus(raw.to_string())),
    }
}

fn index_menu(items: Vec<MenuItem>) -> HashMap<String, MenuItem> {
    items.into_iter().map(|item| (item.id.clone(), item)).collect()
}
