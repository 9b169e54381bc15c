use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::config::Config;
use crate::error::ScheduleError;
use crate::models::auth::{Claims, LoginResponse};

pub struct AuthService;

impl AuthService {
    /// Verifies the shared editor password and issues a short-lived token.
    /// A bcrypt failure and a wrong password read the same to the caller.
    pub fn login(config: &Config, password: &str) -> Result<LoginResponse, ScheduleError> {
        let valid = bcrypt::verify(password, &config.editor_password_hash).unwrap_or(false);
        if !valid {
            return Err(ScheduleError::invalid_input("Invalid password"));
        }
        let token = Self::issue_token(&config.jwt_secret, config.jwt_expiry_seconds)?;
        Ok(LoginResponse {
            token,
            expires_in: config.jwt_expiry_seconds,
        })
    }

    pub fn issue_token(secret: &str, ttl_seconds: u64) -> Result<String, ScheduleError> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "editor".to_string(),
            role: "editor".to_string(),
            iat: now,
            exp: now + ttl_seconds as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| ScheduleError::invalid_input(format!("Could not issue token: {e}")))?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn issued_token_round_trips() {
        let token = AuthService::issue_token("test-secret", 3600).unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.sub, "editor");
        assert_eq!(data.claims.role, "editor");
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn wrong_secret_fails_validation() {
        let token = AuthService::issue_token("test-secret", 3600).unwrap();
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }
}
