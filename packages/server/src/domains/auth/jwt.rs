use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Role;

/// Identity token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // Subject (user_id as string)
    pub user_id: Uuid, // User UUID
    pub email: String, // For logging/debugging
    pub role: Role,    // Authorization role
    pub exp: i64,      // Expiration timestamp
    pub iat: i64,      // Issued at timestamp
    pub iss: String,   // Issuer
    pub jti: String,   // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies identity tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: chrono::Duration,
}

impl JwtService {
    /// Create new JWT service with secret and issuer. Tokens live 24 hours.
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            ttl: chrono::Duration::hours(24),
        }
    }

    pub fn with_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn create_token(&self, user_id: Uuid, email: String, role: Role) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + self.ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            email,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify signature, expiry and issuer, and decode the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_verify_token() {
        let service = JwtService::new("test_secret_key", "test_issuer".to_string());
        let user_id = Uuid::new_v4();

        let token = service
            .create_token(user_id, "hr@example.com".to_string(), Role::Hr)
            .unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "hr@example.com");
        assert_eq!(claims.role, Role::Hr);
        assert_eq!(claims.iss, "test_issuer");
    }

    #[test]
    fn test_wrong_secret_or_issuer() {
        let service = JwtService::new("secret1", "issuer".to_string());
        let token = service
            .create_token(Uuid::new_v4(), "b@example.com".to_string(), Role::Buddy)
            .unwrap();

        assert!(JwtService::new("secret2", "issuer".to_string())
            .verify_token(&token)
            .is_err());
        assert!(JwtService::new("secret1", "other".to_string())
            .verify_token(&token)
            .is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // well past the default 60s leeway
        let service = JwtService::new("secret", "issuer".to_string())
            .with_ttl(chrono::Duration::minutes(-10));
        let token = service
            .create_token(Uuid::new_v4(), "n@example.com".to_string(), Role::Newcomer)
            .unwrap();
        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token() {
        let service = JwtService::new("secret", "issuer".to_string());
        assert!(service.verify_token("invalid_token").is_err());
    }
}
