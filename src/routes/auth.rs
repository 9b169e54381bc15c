use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    models::auth::{Editor, LoginRequest},
    services::auth::AuthService,
    AppState,
};

/// All login failures collapse to 401 so the response does not leak
/// whether the password was close.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match AuthService::login(&state.config, &body.password) {
        Ok(response) => {
            crate::services::metrics::LOGINS_COUNTER
                .with_label_values(&["success"])
                .inc();
            Ok(Json(json!({ "ok": true, "data": response })))
        }
        Err(_) => {
            crate::services::metrics::LOGINS_COUNTER
                .with_label_values(&["failure"])
                .inc();
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "ok": false, "error": "Invalid password" })),
            ))
        }
    }
}

pub async fn me(editor: Editor) -> Json<Value> {
    Json(json!({ "ok": true, "data": { "role": editor.role } }))
}
