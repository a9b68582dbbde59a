//! Table reservation API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{TableReservation, TableReservationPayload};
use crate::AppState;

/// GET /api/reservations - List all table reservations.
pub async fn get_table_reservations(
    State(state): State<AppState>,
) -> ApiResult<Vec<TableReservation>> {
    success(state.reservations.list().await?)
}

/// POST /api/reservations - Add a table reservation.
pub async fn add_table_reservation(
    State(state): State<AppState>,
    payload: Result<Json<TableReservationPayload>, JsonRejection>,
) -> ApiResult<TableReservation> {
    let Json(payload) = payload?;
    success(state.reservations.add(payload).await?)
}

/// PUT /api/reservations/:id - Replace a table reservation.
pub async fn update_table_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TableReservationPayload>, JsonRejection>,
) -> ApiResult<TableReservation> {
    let Json(payload) = payload?;
    success(state.reservations.update(&id, payload).await?)
}
