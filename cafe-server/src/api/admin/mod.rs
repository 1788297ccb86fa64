//! Staff Order API Module
//!
//! All routes require a staff token (see [`require_staff`]).

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, put},
};

use crate::auth::require_staff;
use crate::core::ServerState;

/// Staff router
pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .nest("/api/admin/orders", routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all))
        .route("/{id}/time", put(handler::set_time))
        .route("/{id}/status", put(handler::set_status))
        .route("/{id}", delete(handler::delete))
}
