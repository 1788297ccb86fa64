//! Menu API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::error::AppResult;
use shared::models::MenuItem;

use crate::core::ServerState;
use crate::db::MenuLookup;

/// Query params for the menu listing
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// Comma separated menu item ids
    pub ids: Option<String>,
}

impl MenuQuery {
    fn id_list(&self) -> Option<Vec<String>> {
        let ids: Vec<String> = self
            .ids
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        Some(ids)
    }
}

/// List menu items, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = match query.id_list() {
        Some(ids) => {
            let mut items = state.store.find_by_ids(&ids).await?;
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            items
        }
        None => state.store.list_menu().await?,
    };
    Ok(Json(items))
}
