//! Admin credential verification.
//!
//! There is one admin account, configured by username plus Argon2 hash.
//! Successful login yields a signed bearer token; destructive operations
//! require the claims decoded from that token.

use tracing::{info, warn};

use docshelf_core::config::AuthConfig;
use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;

use crate::jwt::{AdminClaims, AdminToken, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Checks admin credentials and tokens.
#[derive(Debug, Clone)]
pub struct AdminAuthenticator {
    username: String,
    password_hash: Option<String>,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl AdminAuthenticator {
    /// Build from configuration. A malformed password hash is a
    /// configuration error; an empty one disables admin login.
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        let hasher = PasswordHasher::new();
        let password_hash = if config.admin_password_hash.trim().is_empty() {
            warn!("No admin password hash configured; admin login is disabled");
            None
        } else {
            hasher.validate_hash(config.admin_password_hash.trim())?;
            Some(config.admin_password_hash.trim().to_string())
        };

        Ok(Self {
            username: config.admin_username.clone(),
            password_hash,
            hasher,
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        })
    }

    /// Whether an admin password is configured.
    pub fn is_enabled(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Verify credentials and issue a token.
    pub fn login(&self, username: &str, password: &str) -> AppResult<AdminToken> {
        let Some(hash) = &self.password_hash else {
            warn!(username, "Admin login attempted while disabled");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        let password_ok = self.hasher.verify_password(password, hash)?;
        if username != self.username || !password_ok {
            warn!(username, "Admin login failed");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let token = self.encoder.issue(&self.username)?;
        info!(username, expires_at = %token.expires_at, "Admin login successful");
        Ok(token)
    }

    /// Validate a bearer token and return its claims.
    pub fn verify(&self, token: &str) -> AppResult<AdminClaims> {
        let claims = self.decoder.decode(token)?;
        if claims.sub != self.username {
            return Err(AppError::authorization("Token subject is not the admin"));
        }
        Ok(claims)
    }
}
