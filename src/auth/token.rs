//! Signed session token handling
//!
//! The client holds an opaque token: a JWT carrying the session id, signed
//! with the configured `session_secret`. Session state itself lives in the
//! [`SessionManager`](crate::auth::session::SessionManager); the token only
//! proves the id was issued by this server.

use crate::error::{Error, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (session ID)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Claims for a session id, expiring after `ttl_minutes`
    pub fn for_session(session_id: &str, ttl_minutes: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: session_id.to_string(),
            iat: now,
            exp: now + ttl_minutes * 60,
        }
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// Create a signed session token
pub fn create_session_token(session_id: &str, secret: &str, ttl_minutes: i64) -> Result<String> {
    let claims = Claims::for_session(session_id, ttl_minutes);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Token(format!("Failed to create token: {}", e)))
}

/// Validate and decode a session token
pub fn validate_session_token(token: &str, secret: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| Error::Token(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_create_and_validate_token() {
        let token = create_session_token("session-123", SECRET, 30).expect("Failed to create");
        let claims = validate_session_token(&token, SECRET).expect("Failed to validate");

        assert_eq!(claims.sub, "session-123");
        assert!(!claims.is_expired());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token() {
        let result = validate_session_token("invalid.token.here", SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_session_token("session-123", SECRET, 30).expect("Failed to create");
        let result = validate_session_token(&token, "another-secret");
        assert!(result.is_err());
    }
}
