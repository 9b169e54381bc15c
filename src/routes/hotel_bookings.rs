use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::auth::Editor,
    models::hotel_booking::{CreateHotelBookingRequest, UpdateHotelBookingRequest},
    routes::error_response,
    services::hotel_bookings::HotelBookingService,
    AppState,
};

pub async fn create(
    State(state): State<AppState>,
    _editor: Editor,
    Json(body): Json<CreateHotelBookingRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let booking = HotelBookingService::create(&state.db, &body)
        .await
        .map_err(error_response)?;

    crate::services::metrics::BOOKINGS_CREATED_COUNTER.inc();
    Ok(Json(json!({ "ok": true, "data": booking })))
}

pub async fn update(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateHotelBookingRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let booking = HotelBookingService::update(&state.db, id, &body)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "ok": true, "data": booking })))
}

pub async fn delete(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    HotelBookingService::delete(&state.db, id)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "ok": true })))
}
