//! Password hashing and bearer token issue/verification

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::errors::AuthError;
use crate::config::AuthConfig;

/// Token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// bcrypt hashing, run on the blocking pool so request workers stay free
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(AuthError::from)
    }

    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(AuthError::from)
    }
}

/// HS256 token service
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Result<Self, AuthError> {
        let ttl =
            Duration::try_hours(ttl_hours).ok_or(AuthError::InvalidTokenLifetime(ttl_hours))?;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    /// Configured lifetimes must be positive
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if config.token_ttl_hours <= 0 {
            return Err(AuthError::InvalidTokenLifetime(config.token_ttl_hours));
        }
        Self::new(&config.jwt_secret, config.token_ttl_hours)
    }

    /// Sign a token for `user_id`
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::TokenIssue("expiry out of range".to_string()))?;
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))
    }

    /// Check signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let service = TokenService::new("secret", 1).unwrap();
        let token = service.issue(42).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_foreign_signature() {
        let token = TokenService::new("one", 1).unwrap().issue(7).unwrap();
        let err = TokenService::new("two", 1).unwrap().verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_is_reported() {
        let service = TokenService::new("secret", -2).unwrap();
        let token = service.issue(7).unwrap();
        assert!(matches!(service.verify(&token), Err(AuthError::ExpiredToken)));
    }

    #[test]
    fn garbage_is_invalid() {
        let service = TokenService::new("secret", 1).unwrap();
        assert!(matches!(
            service.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn out_of_range_lifetime_is_an_error() {
        assert!(matches!(
            TokenService::new("secret", i64::MAX),
            Err(AuthError::InvalidTokenLifetime(i64::MAX))
        ));

        let mut config = crate::Config::for_tests().auth;
        config.token_ttl_hours = 0;
        assert!(matches!(
            TokenService::from_config(&config),
            Err(AuthError::InvalidTokenLifetime(0))
        ));
    }

    #[tokio::test]
    async fn hash_and_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("hunter22").await.unwrap();
        assert_ne!(hash, "hunter22");
        assert!(hasher.verify("hunter22", &hash).await.unwrap());
        assert!(!hasher.verify("wrong", &hash).await.unwrap());
    }
}
