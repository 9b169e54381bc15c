use serde::{Deserialize, Serialize};

/// Claims embedded in the editor JWT. There is one shared editor credential,
/// so `sub` is the fixed literal "editor".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
}

/// Proof of a validated editor token, produced by the axum extractor.
#[derive(Debug, Clone)]
pub struct Editor {
    pub role: String,
}
