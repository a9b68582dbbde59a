//! Menu item API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{MenuItem, MenuItemPayload};
use crate::AppState;

/// GET /api/menu-items - List all menu items.
pub async fn get_menu_items(State(state): State<AppState>) -> ApiResult<Vec<MenuItem>> {
    success(state.menu_items.list().await?)
}

/// POST /api/menu-items - Add a menu item.
pub async fn add_menu_item(
    State(state): State<AppState>,
    payload: Result<Json<MenuItemPayload>, JsonRejection>,
) -> ApiResult<MenuItem> {
    let Json(payload) = payload?;
    success(state.menu_items.add(payload).await?)
}

/// PUT /api/menu-items/:id - Replace a menu item.
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MenuItemPayload>, JsonRejection>,
) -> ApiResult<MenuItem> {
    let Json(payload) = payload?;
    success(state.menu_items.update(&id, payload).await?)
}
