use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    models::auth::Editor,
    models::contact::{CreateContactRequest, UpdateContactRequest},
    routes::error_response,
    services::contacts::ContactService,
    AppState,
};

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let contacts = ContactService::list(&state.db).await.map_err(error_response)?;
    Ok(Json(json!({ "ok": true, "data": contacts })))
}

pub async fn create(
    State(state): State<AppState>,
    _editor: Editor,
    Json(body): Json<CreateContactRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let contact = ContactService::create(&state.db, &body)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "ok": true, "data": contact })))
}

pub async fn update(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateContactRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let contact = ContactService::update(&state.db, id, &body)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "ok": true, "data": contact })))
}

pub async fn delete(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    ContactService::delete(&state.db, id)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "ok": true })))
}
