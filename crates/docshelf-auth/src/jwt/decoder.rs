//! Admin token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use docshelf_core::config::AuthConfig;
use docshelf_core::error::AppError;

use super::claims::{ADMIN_ROLE, AdminClaims};

/// Validates admin tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    ///
    /// Checks signature, expiration and the admin role claim.
    pub fn decode(&self, token: &str) -> Result<AdminClaims, AppError> {
        let token_data = decode::<AdminClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })?;

        if token_data.claims.role != ADMIN_ROLE {
            return Err(AppError::authorization("Admin role required"));
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use docshelf_core::ErrorKind;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_then_decode() {
        let cfg = config("secret-a");
        let token = JwtEncoder::new(&cfg).issue("admin").unwrap();
        assert_eq!(token.token_type, "Bearer");

        let claims = JwtDecoder::new(&cfg).decode(&token.access_token).unwrap();
        assert_eq!(claims.username(), "admin");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtEncoder::new(&config("secret-a")).issue("admin").unwrap();
        let err = JwtDecoder::new(&config("secret-b"))
            .decode(&token.access_token)
            .unwrap_err();
        assert!(err.is(ErrorKind::Authentication));
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config("s")).decode("abc.def.ghi").unwrap_err();
        assert!(err.is(ErrorKind::Authentication));
    }
}
