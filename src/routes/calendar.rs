use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    routes::error_response,
    scheduling::dates::parse_ymd,
    services::day_data::DayDataService,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct CalendarRangeQuery {
    pub start: String,
    pub end: String,
}

/// Day data for a wall-date window, keyed by date string.
pub async fn get_range(
    State(state): State<AppState>,
    Query(query): Query<CalendarRangeQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let start = parse_ymd(&query.start).map_err(error_response)?;
    let end = parse_ymd(&query.end).map_err(error_response)?;

    let days = DayDataService::fetch_range(&state.db, start, end)
        .await
        .map_err(error_response)?;

    Ok(Json(json!({ "ok": true, "data": days })))
}

/// Single-day convenience view: a one-day window of the range query.
pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let date = parse_ymd(&date).map_err(error_response)?;

    let mut days = DayDataService::fetch_range(&state.db, date, date)
        .await
        .map_err(error_response)?;

    let day = days.remove(&date).unwrap_or_default();
    Ok(Json(json!({ "ok": true, "data": day })))
}
