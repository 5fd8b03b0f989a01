//! `AdminUser` extractor: pulls the bearer token from the Authorization
//! header and validates it as an admin token.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use docshelf_auth::AdminClaims;
use docshelf_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Claims of the admin making the request.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AdminClaims);

impl std::ops::Deref for AdminUser {
    type Target = AdminClaims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.authenticator.verify(token)?;
        Ok(AdminUser(claims))
    }
}
