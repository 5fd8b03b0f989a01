//! # docshelf-auth
//!
//! Server-side admin authentication for DocShelf.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and verification
//! - `jwt`: admin bearer token creation and validation
//! - `admin`: credential check against configuration, token issue and verify

pub mod admin;
pub mod jwt;
pub mod password;

pub use admin::AdminAuthenticator;
pub use jwt::{AdminClaims, AdminToken, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
