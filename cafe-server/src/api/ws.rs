//! 订单事件 WebSocket
//!
//! GET /api/ws
//!
//! 协议:
//! - Server → Client: 文本帧 `{"event": "newOrder" | "orderUpdate" | "orderDeleted", "data": ...}`
//! - Client → Server: 不处理 (只读订阅)
//!
//! 每个连接一个订阅者，只收到连接建立之后的事件。

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use tokio::time::Duration;

use crate::core::ServerState;

/// 心跳间隔
const PING_INTERVAL: Duration = Duration::from_secs(30);

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/ws", get(handle_ws))
}

/// GET /api/ws
pub async fn handle_ws(State(state): State<ServerState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_session(socket, state))
}

async fn ws_session(socket: WebSocket, state: ServerState) {
    let (mut sink, mut stream) = socket.split();

    // 先注册再进入循环，握手完成后的事件都不会丢
    let mut subscription = state.hub.subscribe();
    let subscriber_id = subscription.id();
    let shutdown = state.hub.shutdown_token().clone();

    tracing::info!(subscriber_id, "Order WS connected");

    let mut ping_interval = tokio::time::interval(PING_INTERVAL);
    ping_interval.tick().await; // skip immediate

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }

            _ = ping_interval.tick() => {
                if sink.send(Message::Ping(vec![].into())).await.is_err() {
                    break;
                }
            }

            event = subscription.recv() => {
                let Some(event) = event else {
                    break;
                };
                let text = match event.to_json() {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!(subscriber_id, event = %event.kind(), "Failed to encode order event: {}", e);
                        continue;
                    }
                };
                if sink.send(Message::Text(text.into())).await.is_err() {
                    tracing::debug!(subscriber_id, "Order WS send failed, dropping subscriber");
                    break;
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    // Subscription 在此 drop，自动注销
    drop(subscription);
    tracing::info!(subscriber_id, "Order WS disconnected");
}
