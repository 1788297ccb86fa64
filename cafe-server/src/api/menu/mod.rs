//! Menu API Module
//!
//! Read-only menu listing. Menu management is not exposed over HTTP.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Menu router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu", get(handler::list))
}
