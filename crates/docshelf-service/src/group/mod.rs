//! Group use cases.

pub mod service;

pub use service::GroupService;
