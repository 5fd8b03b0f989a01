//! Admin authentication configuration.

use serde::{Deserialize, Serialize};

/// Server-side admin credential and token settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The single admin account name.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Argon2 PHC hash of the admin password.
    ///
    /// Empty means admin login is disabled. Generate one with
    /// `docshelf-cli admin hash-password`.
    #[serde(default)]
    pub admin_password_hash: String,
    /// HMAC secret used to sign admin bearer tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Admin token lifetime in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password_hash: String::new(),
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl(),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_jwt_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_token_ttl() -> i64 {
    60
}
