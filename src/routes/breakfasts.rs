use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::auth::Editor,
    models::breakfast::{CreateBreakfastRequest, UpdateBreakfastRequest},
    routes::error_response,
    services::breakfast::BreakfastService,
    AppState,
};

pub async fn create(
    State(state): State<AppState>,
    _editor: Editor,
    Json(body): Json<CreateBreakfastRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let breakfast = BreakfastService::create(&state.db, &body)
        .await
        .map_err(error_response)?;

    crate::services::metrics::BREAKFASTS_CONFIGURED_COUNTER.inc();
    Ok(Json(json!({ "ok": true, "data": breakfast })))
}

pub async fn update(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBreakfastRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let breakfast = BreakfastService::update(&state.db, id, &body)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "ok": true, "data": breakfast })))
}

pub async fn delete(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    BreakfastService::delete(&state.db, id)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "ok": true })))
}
