//! Staff Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::error::AppResult;
use shared::models::OrderDetail;

use crate::auth::CurrentUser;
use crate::api::extract::AppJson;
use crate::core::ServerState;
use crate::db::OrderFilter;

/// Estimated time payload (`{"time": 15}`)
#[derive(Debug, Deserialize)]
pub struct SetTimeRequest {
    /// Minutes
    pub time: f64,
}

/// Status payload (`{"status": "done"}`)
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List all orders, newest first
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderDetail>>> {
    let orders = state.orders.list(&OrderFilter::all()).await?;
    Ok(Json(orders))
}

/// Set the estimated preparation time (forces `preparing`)
pub async fn set_time(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<SetTimeRequest>,
) -> AppResult<Json<OrderDetail>> {
    tracing::debug!(order_id = %id, staff = %user.username, minutes = payload.time, "Set order time");
    let order = state.orders.set_estimated_time(&id, payload.time).await?;
    Ok(Json(order))
}

/// Set the order status (`preparing` / `done` / `canceled`)
pub async fn set_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<SetStatusRequest>,
) -> AppResult<Json<OrderDetail>> {
    tracing::debug!(order_id = %id, staff = %user.username, status = %payload.status, "Set order status");
    let order = state.orders.set_status(&id, &payload.status).await?;
    Ok(Json(order))
}

/// Permanently delete an order
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    tracing::debug!(order_id = %id, staff = %user.username, "Delete order");
    state.orders.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: "Order deleted successfully".to_string(),
    }))
}
