use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::env;

/// Claims carried by an operator dashboard session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and validates dashboard session tokens. Sessions last 24 hours.
#[derive(Clone)]
pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    pub fn new() -> Self {
        let secret = env::var("SECRET").expect("SECRET environment variable not found");
        JwtManager { secret }
    }

    pub fn from_secret(secret: String) -> Self {
        JwtManager { secret }
    }

    pub fn generate_token(&self, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expiration = now + Duration::hours(24);

        let claims = AdminClaims {
            username: username.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
    }

    pub fn validate_token(&self, token: &str) -> Result<AdminClaims, jsonwebtoken::errors::Error> {
        let token_data: TokenData<AdminClaims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub fn is_token_valid(&self, token: &str) -> bool {
        match self.validate_token(token) {
            Ok(claims) => claims.exp > Utc::now().timestamp(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_session_token() {
        let manager = JwtManager::from_secret("test-secret".to_string());
        let token = manager.generate_token("operator").unwrap();
        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.username, "operator");
        assert!(manager.is_token_valid(&token));
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let manager = JwtManager::from_secret("test-secret".to_string());
        let other = JwtManager::from_secret("other-secret".to_string());
        let token = other.generate_token("operator").unwrap();
        assert!(manager.validate_token(&token).is_err());
        assert!(!manager.is_token_valid(&token));
    }
}
