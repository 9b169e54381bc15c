use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::ScheduleError,
    models::auth::Editor,
    models::program_item::{
        CreateProgramItemRequest, CreatedProgramItems, DeleteItemQuery, UpdateProgramItemRequest,
    },
    routes::error_response,
    services::program_items::ProgramItemService,
    AppState,
};

pub async fn create(
    State(state): State<AppState>,
    _editor: Editor,
    Json(body): Json<CreateProgramItemRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let created = ProgramItemService::create(&state.db, &body)
        .await
        .map_err(error_response)?;

    match created {
        CreatedProgramItems::Single(item) => {
            crate::services::metrics::ITEMS_CREATED_COUNTER
                .with_label_values(&[&item.item_type])
                .inc();
            Ok(Json(json!({ "ok": true, "data": item })))
        }
        CreatedProgramItems::Recurring(recurring) => {
            crate::services::metrics::ITEMS_CREATED_COUNTER
                .with_label_values(&[&body.item_type])
                .inc_by(recurring.count as f64);
            Ok(Json(json!({
                "ok": true,
                "count": recurring.count,
                "data": recurring,
            })))
        }
    }
}

pub async fn update(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProgramItemRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let items = ProgramItemService::update(&state.db, id, &body)
        .await
        .map_err(error_response)?;

    if body.apply_to_series {
        Ok(Json(json!({ "ok": true, "count": items.len(), "data": items })))
    } else {
        let item = items
            .into_iter()
            .next()
            .ok_or_else(|| error_response(ScheduleError::NotFound("Program item")))?;
        Ok(Json(json!({ "ok": true, "data": item })))
    }
}

pub async fn delete(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteItemQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let count = ProgramItemService::delete(&state.db, id, query.series)
        .await
        .map_err(error_response)?;

    Ok(Json(delete_body(query.series, count)))
}

/// `count` is a batch-only field; a single-occurrence delete answers with the
/// bare envelope.
fn delete_body(series: bool, count: u64) -> Value {
    if series {
        json!({ "ok": true, "count": count })
    } else {
        json!({ "ok": true })
    }
}

/// How many sibling occurrences an item has, for "apply to series?" prompts.
pub async fn occurrences(
    State(state): State<AppState>,
    _editor: Editor,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let info = ProgramItemService::count_other_occurrences(&state.db, id)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "ok": true, "data": info })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_delete_reports_a_count() {
        let body = delete_body(true, 53);
        assert_eq!(body["ok"], true);
        assert_eq!(body["count"], 53);
    }

    #[test]
    fn single_delete_omits_count() {
        let body = delete_body(false, 1);
        assert_eq!(body["ok"], true);
        assert!(body.get("count").is_none());
    }
}
