//! Customer Order API Module
//!
//! Public routes: place an order, list a customer's orders, check one order.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_for_customer).post(handler::create))
        .route("/status/{id}", get(handler::get_status))
}
