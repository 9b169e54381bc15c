use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::auth::Editor,
    models::reservation::{CreateReservationRequest, UpdateReservationRequest},
    routes::error_response,
    services::reservations::ReservationService,
    AppState,
};

pub async fn create(
    State(state): State<AppState>,
    _editor: Editor,
    Json(body): Json<CreateReservationRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let reservation = ReservationService::create(&state.db, &body)
        .await
        .map_err(error_response)?;

    crate::services::metrics::RESERVATIONS_CREATED_COUNTER.inc();
    Ok(Json(json!({ "ok": true, "data": reservation })))
}

pub async fn update(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateReservationRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let reservation = ReservationService::update(&state.db, id, &body)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "ok": true, "data": reservation })))
}

pub async fn delete(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ReservationService::delete(&state.db, id)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "ok": true })))
}
