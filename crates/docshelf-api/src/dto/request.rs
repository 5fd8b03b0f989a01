//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use docshelf_core::error::AppError;

/// Admin login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create group request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupRequest {
    /// Group name. Surrounding whitespace is trimmed by the service.
    #[validate(length(min = 1, max = 200, message = "Group name must be 1-200 characters"))]
    pub name: String,
}

/// Runs `validator` rules and converts failures into a `Validation` error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
