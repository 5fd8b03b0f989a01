//! Admin JWT encoding, decoding, and claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::AdminClaims;
pub use decoder::JwtDecoder;
pub use encoder::{AdminToken, JwtEncoder};
