//! HTTP API 路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 健康检查 | 无 |
//! | /api/menu | GET | 菜单 (可选 `ids=a,b`) | 无 |
//! | /api/orders | POST | 下单 | 无 |
//! | /api/orders?customer_name= | GET | 顾客订单列表 | 无 |
//! | /api/orders/status/{id} | GET | 订单状态 | 无 |
//! | /api/admin/orders | GET | 全部订单 | 员工 |
//! | /api/admin/orders/{id}/time | PUT | 设置预计时间 | 员工 |
//! | /api/admin/orders/{id}/status | PUT | 设置状态 | 员工 |
//! | /api/admin/orders/{id} | DELETE | 删除订单 | 员工 |
//! | /api/ws | GET | 订单事件 WebSocket | 无 |

pub mod admin;
pub mod extract;
pub mod health;
pub mod menu;
pub mod orders;
pub mod ws;

use axum::Router;
use http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Menu API - public, read-only
        .merge(menu::router())
        // Customer order API - public
        .merge(orders::router())
        // Staff order API - staff role required
        .merge(admin::router(state))
        // Real-time order events
        .merge(ws::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: ServerState) -> Router {
    let cors = cors_layer(state.config.frontend_url.as_deref());

    build_router(&state)
        .with_state(state)
        // CORS - Handle cross-origin requests
        .layer(cors)
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
}

/// 配置了 `FRONTEND_URL` 时只允许该来源，否则允许任意来源
fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let Some(url) = frontend_url else {
        return CorsLayer::permissive();
    };

    match HeaderValue::from_str(url) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        Err(e) => {
            tracing::warn!(frontend_url = %url, "Invalid FRONTEND_URL ({}), allowing any origin", e);
            CorsLayer::permissive()
        }
    }
}
