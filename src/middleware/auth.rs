use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};

use crate::models::auth::{Claims, Editor};

impl<S> FromRequestParts<S> for Editor
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(not_authenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(not_authenticated)?;

        let secret = parts.extensions.get::<JwtSecret>().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": "JWT secret not configured" })),
        ))?;

        let editor = decode_access_token(token, &secret.0).map_err(|_| not_authenticated())?;

        Ok(editor)
    }
}

fn not_authenticated() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "ok": false, "error": "Not authenticated" })),
    )
}

/// Extension type to carry the JWT secret through request extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

pub fn decode_access_token(token: &str, secret: &str) -> Result<Editor, anyhow::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &key, &validation)?;
    let claims = data.claims;

    if claims.role != "editor" {
        anyhow::bail!("unexpected role in token: {}", claims.role);
    }

    Ok(Editor { role: claims.role })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::AuthService;

    #[test]
    fn decodes_a_freshly_issued_token() {
        let token = AuthService::issue_token("test-secret", 3600).unwrap();
        let editor = decode_access_token(&token, "test-secret").unwrap();
        assert_eq!(editor.role, "editor");
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let token = AuthService::issue_token("test-secret", 3600).unwrap();
        assert!(decode_access_token(&token, "other-secret").is_err());
    }
}
