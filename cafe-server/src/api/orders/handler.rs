//! Customer Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult};
use shared::models::{OrderCreate, OrderDetail};

use crate::api::extract::AppJson;
use crate::core::ServerState;
use crate::db::OrderFilter;

/// Query params for the customer order list
#[derive(Debug, Deserialize)]
pub struct CustomerQuery {
    pub customer_name: Option<String>,
}

/// Place a new order
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<OrderCreate>,
) -> AppResult<Json<OrderDetail>> {
    let order = state.orders.create(payload).await?;
    Ok(Json(order))
}

/// List orders of one customer, newest first
pub async fn list_for_customer(
    State(state): State<ServerState>,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let name = query
        .customer_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| {
            AppError::validation("Customer name is required").with_detail("field", "customer_name")
        })?;

    let orders = state.orders.list(&OrderFilter::by_customer(name)).await?;
    Ok(Json(orders))
}

/// Get one order by id
pub async fn get_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let order = state.orders.get(&id).await?;
    Ok(Json(order))
}
