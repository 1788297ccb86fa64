//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::future::IntoFuture;
use std::time::Duration;

use crate::api;
use crate::core::{Config, Result, ServerState};
use crate::message::BroadcastHub;

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// 启动 HTTP + WebSocket 服务，直到收到 Ctrl-C
    ///
    /// 收到信号后先关闭广播中心 (WS 会话随之退出)，再等待进行中的请求，
    /// 超过 `shutdown_timeout_ms` 直接返回。
    pub async fn run(&self) -> Result<()> {
        let app = api::build_app(self.state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("☕ Cafe server listening on {}", addr);

        let hub = self.state.hub.clone();
        let token = hub.shutdown_token().clone();
        let grace = Duration::from_millis(self.config.shutdown_timeout_ms);

        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(hub))
            .into_future();

        tokio::select! {
            result = serve => result?,
            _ = async {
                token.cancelled().await;
                tokio::time::sleep(grace).await;
            } => {
                tracing::warn!(timeout_ms = self.config.shutdown_timeout_ms, "Graceful shutdown timed out");
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal(hub: BroadcastHub) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
    hub.shutdown();
}
