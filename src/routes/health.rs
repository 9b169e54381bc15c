use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Liveness plus a store round-trip, in the same envelope the rest of the
/// API speaks.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let ping = sqlx::query("SELECT 1").execute(&state.db).await;
    health_body(ping.err().map(|e| e.to_string()))
}

fn health_body(db_error: Option<String>) -> (StatusCode, Json<Value>) {
    match db_error {
        None => (
            StatusCode::OK,
            Json(json!({ "ok": true, "data": { "db": "connected" } })),
        ),
        Some(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "ok": false, "error": format!("Database unreachable: {e}") })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_body_uses_the_envelope() {
        let (status, Json(body)) = health_body(None);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"]["db"], "connected");
    }

    #[test]
    fn db_failure_is_a_503_error_envelope() {
        let (status, Json(body)) = health_body(Some("pool timed out".into()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["ok"], false);
        assert!(body["error"].as_str().unwrap().contains("pool timed out"));
    }
}
