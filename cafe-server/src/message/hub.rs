//! 订单事件广播中心
//!
//! # 架构
//!
//! ```text
//! OrderStore ──▶ publish(OrderEvent) ──┬──▶ mpsc queue ──▶ WS session #1
//!                  (同步, 不阻塞)        ├──▶ mpsc queue ──▶ WS session #2
//!                                       └──▶ mpsc queue ──▶ WS session #N
//! ```
//!
//! 每个订阅者独占一个无界 FIFO 队列：同一订阅者按发布顺序收到每条事件恰好一次，
//! 慢订阅者不会阻塞发布方或其他订阅者。不同订阅者之间没有顺序保证，也不回放历史事件。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use shared::message::OrderEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

type EventSender = mpsc::UnboundedSender<Arc<OrderEvent>>;

/// 广播中心 - 订阅者注册表 + 扇出
///
/// 显式构造后注入 `OrderStore`，由 `ServerState` 持有。
#[derive(Debug, Clone)]
pub struct BroadcastHub {
    /// 订阅者 (Subscriber ID -> 事件队列)
    subscribers: Arc<DashMap<u64, EventSender>>,
    next_id: Arc<AtomicU64>,
    /// 关闭信号令牌
    shutdown_token: CancellationToken,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// 注册订阅者
    ///
    /// 只能收到注册之后发布的事件。
    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.insert(id, tx);

        tracing::debug!(subscriber_id = id, total = self.subscribers.len(), "Subscriber registered");

        Subscription {
            id,
            rx,
            hub: self.clone(),
        }
    }

    /// 注销订阅者 (重复调用无副作用)
    pub fn unsubscribe(&self, id: u64) {
        if self.subscribers.remove(&id).is_some() {
            tracing::debug!(subscriber_id = id, total = self.subscribers.len(), "Subscriber removed");
        }
    }

    /// 发布事件到所有订阅者
    ///
    /// 只入队不等待投递，永不失败；队列已关闭的订阅者顺带从注册表移除。
    pub fn publish(&self, event: OrderEvent) {
        let event = Arc::new(event);
        let mut closed = Vec::new();
        let mut delivered = 0usize;

        for entry in self.subscribers.iter() {
            if entry.value().send(Arc::clone(&event)).is_ok() {
                delivered += 1;
            } else {
                closed.push(*entry.key());
            }
        }

        for id in closed {
            self.subscribers.remove(&id);
            tracing::debug!(subscriber_id = id, "Dropped closed subscriber");
        }

        tracing::debug!(
            event = %event.kind(),
            order_id = %event.order_id(),
            delivered,
            "Order event published"
        );
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// 关闭信号令牌 (WS 会话监听)
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// 通知所有会话关闭并清空注册表
    pub fn shutdown(&self) {
        tracing::info!(subscribers = self.subscribers.len(), "Shutting down broadcast hub");
        self.shutdown_token.cancel();
        self.subscribers.clear();
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

/// 订阅句柄
///
/// Drop 时自动注销。
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<Arc<OrderEvent>>,
    hub: BroadcastHub,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// 等待下一条事件；hub 关闭或已注销时返回 `None`
    pub async fn recv(&mut self) -> Option<Arc<OrderEvent>> {
        self.rx.recv().await
    }

    /// 非阻塞读取已入队的事件
    pub fn try_recv(&mut self) -> Option<Arc<OrderEvent>> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(sub: &mut Subscription) -> Vec<String> {
        let mut ids = Vec::new();
        while let Some(event) = sub.try_recv() {
            ids.push(event.order_id().to_string());
        }
        ids
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let hub = BroadcastHub::new();
        hub.publish(OrderEvent::order_deleted("o1"));
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_receives_in_publish_order() {
        let hub = BroadcastHub::new();
        let mut sub = hub.subscribe();

        for n in [0usize, 1, 7, 50] {
            let expected: Vec<String> = (0..n).map(|i| format!("o{}", i)).collect();
            for id in &expected {
                hub.publish(OrderEvent::order_deleted(id.clone()));
            }
            assert_eq!(drain(&mut sub), expected);
        }
    }

    #[test]
    fn test_every_subscriber_gets_each_event_once() {
        let hub = BroadcastHub::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        hub.publish(OrderEvent::order_deleted("x"));
        hub.publish(OrderEvent::order_deleted("y"));

        assert_eq!(drain(&mut a), vec!["x", "y"]);
        assert_eq!(drain(&mut b), vec!["x", "y"]);
    }

    #[test]
    fn test_late_subscriber_gets_no_replay() {
        let hub = BroadcastHub::new();
        hub.publish(OrderEvent::order_deleted("early"));

        let mut sub = hub.subscribe();
        hub.publish(OrderEvent::order_deleted("late"));
        assert_eq!(drain(&mut sub), vec!["late"]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub = BroadcastHub::new();
        let sub = hub.subscribe();
        let _other = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        drop(sub);
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn test_closed_queue_is_collected_on_publish() {
        let hub = BroadcastHub::new();
        let (tx, rx) = mpsc::unbounded_channel();
        hub.subscribers.insert(99, tx);
        drop(rx);

        let mut live = hub.subscribe();
        hub.publish(OrderEvent::order_deleted("o1"));

        assert_eq!(hub.subscriber_count(), 1);
        assert_eq!(drain(&mut live), vec!["o1"]);
    }

    #[tokio::test]
    async fn test_shutdown_ends_subscriptions() {
        let hub = BroadcastHub::new();
        let mut sub = hub.subscribe();
        hub.shutdown();

        assert!(hub.shutdown_token().is_cancelled());
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_churn_during_publish_keeps_each_queue_ordered() {
        const EVENTS: usize = 500;
        let hub = BroadcastHub::new();
        let mut stable = hub.subscribe();

        let publisher = {
            let hub = hub.clone();
            tokio::spawn(async move {
                for i in 0..EVENTS {
                    hub.publish(OrderEvent::order_deleted(i.to_string()));
                    if i % 25 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            })
        };

        let churners: Vec<_> = (0..4)
            .map(|_| {
                let hub = hub.clone();
                tokio::spawn(async move {
                    for _ in 0..50 {
                        let mut sub = hub.subscribe();
                        tokio::task::yield_now().await;
                        let seen: Vec<usize> = drain(&mut sub)
                            .iter()
                            .map(|id| id.parse().unwrap())
                            .collect();
                        // 中途加入的订阅者收到连续的一段事件，无重复、无跳号
                        assert!(seen.windows(2).all(|w| w[1] == w[0] + 1), "{:?}", seen);
                    }
                })
            })
            .collect();

        publisher.await.unwrap();
        for churner in churners {
            churner.await.unwrap();
        }

        let expected: Vec<String> = (0..EVENTS).map(|i| i.to_string()).collect();
        assert_eq!(drain(&mut stable), expected);
        assert_eq!(hub.subscriber_count(), 1);
    }
}
