//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod document;
pub mod group;
pub mod health;
pub mod public;
