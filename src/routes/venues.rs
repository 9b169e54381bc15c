use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::auth::Editor,
    models::venue::{CreateVenueRequest, UpdateVenueRequest},
    routes::error_response,
    services::venues::VenueService,
    AppState,
};

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let venues = VenueService::list(&state.db).await.map_err(error_response)?;
    Ok(Json(json!({ "ok": true, "data": venues })))
}

pub async fn create(
    State(state): State<AppState>,
    _editor: Editor,
    Json(body): Json<CreateVenueRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let venue = VenueService::create(&state.db, &body)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "ok": true, "data": venue })))
}

pub async fn update(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateVenueRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let venue = VenueService::update(&state.db, id, &body)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "ok": true, "data": venue })))
}

pub async fn delete(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    VenueService::delete(&state.db, id)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "ok": true })))
}
