//! Session token utilities.
//!
//! This module signs and validates the JWT carried by the session cookie.
//! Tokens use HS256 with a process-wide secret: the registry is a private,
//! single-tenant deployment, so there is no cross-service verification that
//! would call for an asymmetric key pair.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for session token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Session token claims.
///
/// The token carries the user's id, email, and role so that the guard can
/// authorize requests without a database round trip per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email (login identity, stored lowercase)
    pub email: String,
    /// User role (super_admin, admin, viewer)
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID (unique token identifier)
    pub jti: String,
}

/// Default session lifetime in seconds (7 days).
pub const DEFAULT_SESSION_EXPIRY_SECS: i64 = 604_800;

/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Configuration for session token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Session token expiration in seconds (default: 604800 = 7 days)
    pub session_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance (default: 30)
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("session_expiry_secs", &self.session_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Creates a new JwtConfig from a shared secret.
    pub fn new(secret: &str, session_expiry_secs: i64) -> Self {
        Self::with_leeway(secret, session_expiry_secs, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a new JwtConfig from a shared secret with custom leeway.
    pub fn with_leeway(secret: &str, session_expiry_secs: i64, leeway_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_expiry_secs,
            leeway_secs,
        }
    }

    /// Generates a session token for the given user.
    ///
    /// Returns the signed token and its jti.
    pub fn generate_session_token(
        &self,
        user_id: Uuid,
        email: &str,
        role: &str,
    ) -> Result<(String, String), JwtError> {
        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();
        let exp = (now + Duration::seconds(self.session_expiry_secs)).timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp,
            iat: now.timestamp(),
            jti: jti.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, jti))
    }

    /// Validates a session token and returns its claims.
    pub fn validate_session_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Extracts the user ID from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}
