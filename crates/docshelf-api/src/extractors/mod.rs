//! Custom Axum extractors.

pub mod auth;
pub mod path;

pub use auth::AdminUser;
pub use path::parse_id;
