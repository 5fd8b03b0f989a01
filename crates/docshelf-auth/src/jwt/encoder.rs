//! Admin token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docshelf_core::config::AuthConfig;
use docshelf_core::error::AppError;

use super::claims::{ADMIN_ROLE, AdminClaims};

/// A freshly issued admin token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminToken {
    /// Signed JWT.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Expiration time.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed admin tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: config.token_ttl_minutes.max(1),
        }
    }

    /// Issues a token for the given admin username.
    pub fn issue(&self, username: &str) -> Result<AdminToken, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = AdminClaims {
            sub: username.to_string(),
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode admin token: {e}")))?;

        Ok(AdminToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_at,
        })
    }
}
