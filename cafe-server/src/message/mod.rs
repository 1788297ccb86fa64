//! 实时消息模块
//!
//! - [`BroadcastHub`] - 订阅者注册表与事件扇出
//! - [`Subscription`] - 单个订阅者的事件队列句柄
//!
//! 事件定义见 [`shared::message::OrderEvent`]。

pub mod hub;

pub use hub::{BroadcastHub, Subscription};
pub use shared::message::{OrderEvent, OrderEventKind};
